use arch::Catalog;
use color_print::cprintln;
use stasm::{assemble, listing, load_source, Error};
use std::process::ExitCode;
use tracing::Level;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output file (256-byte RAM image)
    #[clap(short, long, default_value = "main.bin")]
    output: String,

    /// Instruction table (default: bundled table)
    #[clap(short, long)]
    catalog: Option<String>,

    /// Dump listing, labels and RAM
    #[clap(short, long)]
    dump: bool,

    /// Write RAM, used bitmap, line map and labels as JSON
    #[clap(short, long)]
    json: Option<String>,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[clap(short, long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() -> ExitCode {
    use clap::Parser;

    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    println!("Stasm Assembler");

    println!("1. Read Instruction Table");
    let owned;
    let catalog = match &args.catalog {
        Some(path) => {
            println!("  < {}", path);
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| Error::FileRead(path.clone(), e))
                .map(|text| Catalog::parse(&text));
            match parsed {
                Ok(Ok(catalog)) => {
                    owned = catalog;
                    &owned
                }
                Ok(Err(e)) => return catalog_failure(e),
                Err(e) => return failure(e),
            }
        }
        None => match Catalog::builtin() {
            Ok(catalog) => catalog,
            Err(e) => return catalog_failure(e),
        },
    };

    println!("2. Read Source");
    println!("  < {}", args.input);
    let source = match load_source(&args.input) {
        Ok(source) => source,
        Err(e) => return failure(e),
    };

    println!("3. Check Syntax & Resolve Labels");
    let asm = match assemble(&source, catalog) {
        Ok(asm) => asm,
        Err(diag) => {
            diag.print_diag(&args.input, &source);
            return ExitCode::FAILURE;
        }
    };

    println!("4. Write Binary");
    println!("  > {}", args.output);
    if let Err(e) = std::fs::write(&args.output, asm.image()) {
        return failure(Error::FileWrite(args.output.clone(), e));
    }

    if let Some(path) = &args.json {
        println!("  > {}", path);
        let written = asm
            .to_json()
            .map_err(|e| Error::FileWrite(path.clone(), e.into()))
            .and_then(|json| {
                std::fs::write(path, json).map_err(|e| Error::FileWrite(path.clone(), e))
            });
        if let Err(e) = written {
            return failure(e);
        }
    }

    if args.dump {
        listing::print_dump(&asm);
    }

    println!("Success: No errors found");
    ExitCode::SUCCESS
}

fn failure(e: Error) -> ExitCode {
    cprintln!("<red,bold>error</>: {}", e);
    if let Some(source) = std::error::Error::source(&e) {
        cprintln!("  <blue>caused by</>: {}", source);
    }
    ExitCode::FAILURE
}

/// A broken instruction table is not a source error.
fn catalog_failure(e: arch::CatalogError) -> ExitCode {
    cprintln!("<red,bold>fatal</>: {}", e);
    ExitCode::from(2)
}
