use clap::{Parser, Subcommand};
use pdf_gallery::config::{self, GalleryConfig};
use pdf_gallery::gallery::Gallery;
use pdf_gallery::thumbnail::{PdfRenderer, UnavailableRenderer};
use pdf_gallery::types::PreloadedDocument;
use pdf_gallery::{generate, output, scan};
use std::path::{Path, PathBuf};
use tokio::task::LocalSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pdf-gallery")]
#[command(about = "Document gallery for PDF files")]
#[command(long_about = "\
Document gallery for PDF files

Scans a directory of PDFs into the preloaded document list and builds a
static gallery page with a first-page thumbnail for every document.

Gallery root structure:

  site/
  ├── gallery.toml                 # Config (optional)
  ├── DOCS_PDF/                    # PDFs to list (non-recursive)
  │   ├── report.pdf
  │   └── slides.PDF
  ├── data.js                      # Written by `scan` and `build`
  ├── index.html                   # Written by `build`
  └── thumbnails/                  # Written by `build`

Thumbnails need the `pdfium` feature and a PDFium shared library in lib/,
next to the executable, or on the system path. Without it every card shows
the generic PDF glyph.

Run 'pdf-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version = env!("PDF_GALLERY_VERSION"))]
struct Cli {
    /// Gallery root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the PDF directory into the preloaded document list
    Scan,
    /// Scan, render thumbnails and generate the gallery page
    Build,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_gallery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let config = config::load_config(&cli.root)?;
            let (catalog, data_file) = scan::scan_to_data_file(&cli.root, &config)?;
            output::print_scan_output(&catalog, &data_file, &cli.root);
        }
        Command::Build => {
            let config = config::load_config(&cli.root)?;

            println!("==> Scanning {}", cli.root.join(&config.scan.pdf_dir).display());
            let (catalog, data_file) = scan::scan_to_data_file(&cli.root, &config)?;
            output::print_scan_output(&catalog, &data_file, &cli.root);

            println!("==> Rendering thumbnails");
            LocalSet::new()
                .run_until(build_with_available_renderer(&cli.root, config, catalog.documents))
                .await?;

            println!("==> Build complete: {}", cli.root.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

#[cfg(feature = "pdfium")]
async fn build_with_available_renderer(
    root: &Path,
    config: GalleryConfig,
    documents: Vec<PreloadedDocument>,
) -> Result<(), Box<dyn std::error::Error>> {
    match pdf_gallery::thumbnail::PdfiumRenderer::load(root) {
        Ok(renderer) => build(root, config, documents, renderer).await,
        Err(err) => {
            tracing::warn!(error = %err, "PDFium unavailable, thumbnails will use the PDF glyph");
            build(root, config, documents, UnavailableRenderer).await
        }
    }
}

#[cfg(not(feature = "pdfium"))]
async fn build_with_available_renderer(
    root: &Path,
    config: GalleryConfig,
    documents: Vec<PreloadedDocument>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("built without the `pdfium` feature, thumbnails will use the PDF glyph");
    build(root, config, documents, UnavailableRenderer).await
}

/// Hydrate a gallery session, wait for every thumbnail and write the page.
async fn build<R: PdfRenderer + 'static>(
    root: &Path,
    config: GalleryConfig,
    documents: Vec<PreloadedDocument>,
    renderer: R,
) -> Result<(), Box<dyn std::error::Error>> {
    let site = config.site.clone();
    let mut gallery = Gallery::new(config, renderer);
    gallery.hydrate(documents)?.finished().await;

    let stats = gallery.stats();
    let grid = gallery.grid();
    let generated = generate::generate(&site, stats, grid.cards(), root)?;
    output::print_build_output(grid.cards(), &generated, root);
    Ok(())
}
