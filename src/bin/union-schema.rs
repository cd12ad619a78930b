use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use union_schema::{analyze, generate, load_schema, parse_model, AnalyzeError, EmitError};

#[derive(Parser)]
#[command(name = "union-schema", version, about = "Generate typed Rust unions from JSON Schema anyOf groups")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a schema and write the generated Rust sources.
    Generate {
        /// Path to the JSON Schema document.
        schema: PathBuf,

        /// Path to the hand-written base model source.
        #[arg(long)]
        model: PathBuf,

        /// Directory the generated files are written into.
        #[arg(long = "out-dir")]
        out_dir: PathBuf,
    },

    /// Print the analysis of a schema without generating code.
    Analyze {
        /// Path to the JSON Schema document.
        schema: PathBuf,

        /// Print the analysis as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate {
            schema,
            model,
            out_dir,
        } => run_generate(&schema, &model, &out_dir),
        Command::Analyze { schema, json } => run_analyze(&schema, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_generate(schema_path: &Path, model_path: &Path, out_dir: &Path) -> Result<(), u8> {
    let schema = load_schema(schema_path).map_err(report_analyze)?;
    let analysis = analyze(&schema).map_err(report_analyze)?;

    let model_source = fs::read_to_string(model_path).map_err(|err| {
        eprintln!("error: cannot read {}: {}", model_path.display(), err);
        3u8
    })?;
    let model = parse_model(&model_source).map_err(report_emit)?;
    let artifacts = generate(&analysis, &model).map_err(report_emit)?;

    fs::create_dir_all(out_dir).map_err(|err| io_error(out_dir, err))?;
    write_artifact(&out_dir.join("model_enhanced.rs"), &artifacts.model)?;
    write_artifact(&out_dir.join("model_unions.rs"), &artifacts.unions)?;
    write_artifact(&out_dir.join("model_decode.rs"), &artifacts.decode)?;
    Ok(())
}

fn run_analyze(schema_path: &Path, json: bool) -> Result<(), u8> {
    let schema = load_schema(schema_path).map_err(report_analyze)?;
    let analysis = analyze(&schema).map_err(report_analyze)?;

    if json {
        let rendered = serde_json::to_string_pretty(&analysis).map_err(|err| {
            eprintln!("error: {}", err);
            2u8
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("root: {}", analysis.root_name);
    for union in &analysis.unions {
        match &union.discriminant_field {
            Some(field) => {
                println!("union {} (discriminant {:?})", union.name, field);
                for (variant, value) in &union.discriminant_values {
                    println!("  {} = {:?}", variant, value);
                }
            }
            None => {
                println!("union {} (trial decode)", union.name);
                for variant in &union.variant_names {
                    println!("  {}", variant);
                }
            }
        }
    }
    for site in &analysis.sites {
        println!(
            "site {}.{} -> {} ({:?}{})",
            site.owner,
            site.field,
            site.union_group,
            site.cardinality,
            if site.required { ", required" } else { "" }
        );
    }
    Ok(())
}

fn write_artifact(path: &Path, content: &str) -> Result<(), u8> {
    fs::write(path, content).map_err(|err| io_error(path, err))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn io_error(path: &Path, err: std::io::Error) -> u8 {
    eprintln!("error: cannot write {}: {}", path.display(), err);
    3
}

fn report_analyze(err: AnalyzeError) -> u8 {
    eprintln!("error: {}", err);
    err.exit_code() as u8
}

fn report_emit(err: EmitError) -> u8 {
    eprintln!("error: {}", err);
    err.exit_code() as u8
}
