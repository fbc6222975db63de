use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use derive_more::Display;
use edge_motifs::{
    data::{CsrGraph, Graph},
    pattern::Catalog,
    task::{default_workers, CensusConfig, Task, DEFAULT_OUTPUT},
};
use rusqlite::{Connection, OpenFlags};
use std::error::Error;

#[derive(Debug, Display, PartialEq)]
enum Err {
    #[display(fmt = "invalid worker count: {}", _0)]
    InvalidWorkers(String),
    #[display(fmt = "{}", _0)]
    Incomplete(String),
}

impl std::error::Error for Err {}

fn open_graph(matches: &ArgMatches) -> Result<CsrGraph, Box<dyn Error>> {
    let conn = Connection::open_with_flags(
        matches.value_of("DATAGRAPH").unwrap_or_default(),
        OpenFlags::SQLITE_OPEN_READ_ONLY,
    )?;
    Ok(CsrGraph::from_sqlite(&conn)?)
}

fn handle_census(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let workers = match matches.value_of("workers") {
        Some(n) => n
            .parse::<usize>()
            .map_err(|_| Err::InvalidWorkers(n.to_owned()))?,
        None => default_workers(),
    };
    let config = CensusConfig::new(matches.value_of("type").unwrap_or_default())
        .output(matches.value_of("output").unwrap_or(DEFAULT_OUTPUT))
        .workers(workers);
    let graph = open_graph(matches)?;
    let catalog = Catalog::standard()?;
    let report = Task::new(&graph, &catalog, config).run()?;
    if report.is_complete() {
        println!("{}", report);
        Ok(())
    } else {
        for shard in report.shards().iter().filter(|shard| !shard.is_complete()) {
            eprintln!(
                "{}: {} ({} of {} rows, {} skipped)",
                shard.path().display(),
                shard.outcome(),
                shard.rows(),
                shard.edges(),
                shard.skipped()
            );
        }
        Err(Box::new(Err::Incomplete(report.to_string())))
    }
}

fn handle_catalog(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let catalog = Catalog::standard()?;
    if matches.is_present("plans") {
        for entry in catalog.entries() {
            println!("{}", entry.template());
            for plan in entry.plans() {
                println!("    {}", plan);
            }
        }
    } else {
        print!("{}", catalog);
    }
    Ok(())
}

fn handle_info(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let graph = open_graph(matches)?;
    println!("{}", graph.info());
    for etype in graph.etypes() {
        println!("{} {}", etype, graph.count(etype));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("edge-motifs")
        .about("Relationship-centric network motif census")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("census")
                .about("Counts pattern occurrences around every edge of one type")
                .arg(
                    Arg::with_name("DATAGRAPH")
                        .help("SQLite database with an edges(eid, src, dst, etype) table")
                        .required(true),
                )
                .arg(
                    Arg::with_name("type")
                        .short("t")
                        .long("type")
                        .takes_value(true)
                        .required(true)
                        .help("Edge type to anchor on"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("Output path prefix [default: /tmp/motifs.csv]"),
                )
                .arg(
                    Arg::with_name("workers")
                        .short("w")
                        .long("workers")
                        .takes_value(true)
                        .help("Number of workers [default: number of CPUs]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("catalog")
                .about("Prints the pattern catalog")
                .arg(
                    Arg::with_name("plans")
                        .long("plans")
                        .help("Also prints the match plan of every anchor role"),
                ),
        )
        .subcommand(
            SubCommand::with_name("info")
                .about("Prints vertex, edge and edge type counts")
                .arg(Arg::with_name("DATAGRAPH").required(true)),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("census") {
        handle_census(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("catalog") {
        handle_catalog(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("info") {
        handle_info(matches)?;
    }
    Ok(())
}
