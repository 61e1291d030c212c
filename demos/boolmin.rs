use clap::Parser;

use boolmin::config::EngineConfig;
use boolmin::engine::Engine;
use boolmin::minimize::{MinimizeOptions, Strategy};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula in ASCII or LaTeX notation, e.g. `A*B+A*!B` or `A \land \lnot B`.
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Force a minimization strategy: `terms`, `kmap` or `qm`.
    #[clap(long, value_name = "NAME")]
    strategy: Option<String>,

    /// Rewrite iteration bound.
    #[clap(long, value_name = "INT", default_value = "64")]
    max_iterations: usize,

    /// Print the truth table.
    #[clap(long)]
    table: bool,

    /// Print the Karnaugh map with its groups.
    #[clap(long)]
    kmap: bool,

    /// Print the truth table and map as JSON.
    #[clap(long)]
    json: bool,

    /// Log every rule application.
    #[clap(long)]
    debug: bool,
}

fn parse_strategy(name: &str) -> color_eyre::Result<Strategy> {
    match name {
        "terms" => Ok(Strategy::TermCombination),
        "kmap" => Ok(Strategy::KarnaughMap),
        "qm" => Ok(Strategy::QuineMcCluskey),
        other => Err(color_eyre::eyre::eyre!("unknown strategy `{}`", other)),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let engine = Engine::new(EngineConfig {
        max_iterations: args.max_iterations,
        ..EngineConfig::default()
    });

    let expr = engine.parse(&args.formula)?;
    let variables = engine.extract_variables(&expr);
    println!("parsed   = {}", expr);
    println!("latex    = {}", engine.to_latex_string(&expr));
    println!("vars     = {:?}", variables);

    let report = engine.simplify_with_report(&expr);
    println!("simplified = {} ({} iterations)", report.expr, report.iterations);
    if report.max_iterations_reached {
        println!("iteration limit reached");
    }
    if report.size_limit_reached {
        println!("node limit reached");
    }
    println!("rules applied: {:?}", report.applied);

    let options = match &args.strategy {
        Some(name) => MinimizeOptions::with_strategy(parse_strategy(name)?),
        None => MinimizeOptions::default(),
    };
    let result = engine.minimize_with(&expr, &options);
    println!(
        "minimized = {} (strategy: {}{})",
        result.minimal,
        result.strategy,
        if result.fell_back { ", fell back" } else { "" }
    );
    println!(
        "size: {} -> {} -> {} nodes",
        expr.node_count(),
        result.intermediate.node_count(),
        result.minimal.node_count()
    );
    match engine.equivalent(&expr, &result.minimal) {
        Ok(same) => println!("equivalent: {}", same),
        Err(err) => println!("equivalent: not checked ({})", err),
    }

    match engine.variable_importance(&expr) {
        Ok(importance) => {
            for (name, value) in importance {
                println!("importance({}) = {:.3}", name, value);
            }
        }
        Err(err) => println!("importance: skipped ({})", err),
    }

    if args.table {
        let table = engine.truth_table(&expr)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&table)?);
        } else {
            println!("{} | f", table.variables.join(" "));
            for row in &table.rows {
                let inputs: Vec<String> = row
                    .inputs
                    .iter()
                    .zip(&table.variables)
                    .map(|(&bit, name)| format!("{:<width$}", u8::from(bit), width = name.len()))
                    .collect();
                println!("{} | {}", inputs.join(" "), u8::from(row.output));
            }
        }
    }

    if args.kmap {
        let map = engine.kmap(&expr)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&map)?);
        } else {
            println!("K-map {}x{} over {:?}", map.rows, map.cols, map.variables);
            for row in 0..map.rows {
                let line: String = (0..map.cols)
                    .filter_map(|col| map.cell(row, col))
                    .map(|cell| if cell.value { '1' } else { '.' })
                    .collect();
                println!("  {}", line);
            }
            for group in &map.groups {
                println!(
                    "group {}x{} at ({}, {}): {}",
                    group.height, group.width, group.row, group.col, group.implicant
                );
            }
        }
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
