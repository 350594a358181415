use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use invoicepress::catalog::{self, TemplateCatalog, PAGE_CONTAINER_ID};
use invoicepress::rendering::raster::data_url;
use invoicepress::{ExportConfig, ExportPipeline, InvoiceStore, SpoolProvider};

#[derive(Parser)]
#[command(name = "invoicepress", about = "Render and export invoice templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the current invoice as a single-page Letter PDF
    Export {
        /// Template id (1-based; out-of-range ids fall back to template 1)
        #[arg(short, long, default_value_t = 1)]
        template: i32,
        /// Output directory for the PDF
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Skip the settle waits
        #[arg(long)]
        no_wait: bool,
    },
    /// Spool an isolated print document for the current invoice
    Print {
        #[arg(short, long, default_value_t = 1)]
        template: i32,
        /// Spool directory for print documents
        #[arg(short, long, default_value = ".")]
        spool: PathBuf,
        #[arg(long)]
        no_wait: bool,
    },
    /// Print a data-URL capture of a template to stdout
    Preview {
        #[arg(short, long, default_value_t = 1)]
        template: i32,
    },
    /// List the template catalog
    Templates,
    /// Dump the current invoice record as JSON
    Show,
}

fn config(no_wait: bool) -> ExportConfig {
    if no_wait {
        ExportConfig::immediate()
    } else {
        ExportConfig::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let store = InvoiceStore::new();
    let record = store.current();

    match cli.command {
        Command::Export { template, out, no_wait } => {
            let mut cfg = config(no_wait);
            cfg.output_dir = Some(out);
            let pipeline = ExportPipeline::new(cfg);
            let page = catalog::render_page(&record, template);
            let artifact = pipeline
                .export_pdf(&page, PAGE_CONTAINER_ID, &record, template)
                .await
                .context("export failed")?;
            match &artifact.path {
                Some(path) => println!("exported {}", path.display()),
                None => println!("exported {} ({} bytes)", artifact.filename, artifact.bytes.len()),
            }
        }
        Command::Print { template, spool, no_wait } => {
            let pipeline = ExportPipeline::new(config(no_wait));
            let provider = SpoolProvider { dir: spool };
            let page = catalog::render_page(&record, template);
            pipeline
                .print(&page, PAGE_CONTAINER_ID, template, &provider)
                .await
                .context("print failed")?;
            println!("print document spooled");
        }
        Command::Preview { template } => {
            let pipeline = ExportPipeline::new(ExportConfig::immediate());
            let page = catalog::render_page(&record, template);
            let artifact = pipeline
                .export_pdf_full_size(&page, PAGE_CONTAINER_ID, &record, template)
                .await
                .context("preview failed")?;
            println!("{}", data_url(&artifact.screenshot));
        }
        Command::Templates => {
            for handle in TemplateCatalog::new().iter() {
                println!("{:>2}  {}", handle.id, handle.name);
            }
        }
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
