#[macro_use]
extern crate log;

use clap::App;
use clap::AppSettings;
use clap::Arg;
use clap::ArgMatches;
use clap::SubCommand;
use huffman::CodeTable;
use huffman::FrequencyTable;
use huffman::Payload;
use huffman::SideTable;
use huffman::Tree;
use std::error::Error;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use warn::Warn;

struct LogWarn<'a>(&'a Path);

impl<'a, W: fmt::Debug> Warn<W> for LogWarn<'a> {
    fn warn(&mut self, warning: W) {
        warn!("{}: {:?}", self.0.display(), warning);
    }
}

fn table_path(matches: &ArgMatches, data_path: &Path) -> PathBuf {
    match matches.value_of_os("TABLE") {
        Some(p) => PathBuf::from(p),
        None => {
            let mut p: OsString = data_path.as_os_str().to_owned();
            p.push(".freq");
            PathBuf::from(p)
        }
    }
}

fn compress(input: &Path, output: &Path, table: &Path) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input)?;
    let (frequencies, payload) = huffman::compress(text.chars())?;
    fs::write(output, &payload.bytes)?;
    SideTable::new(frequencies, payload.padding).write(fs::File::create(table)?)?;
    info!(
        "{}: {} symbols -> {} bytes, padding={}",
        input.display(),
        text.chars().count(),
        payload.bytes.len(),
        payload.padding,
    );
    Ok(())
}

fn read_side_table(path: &Path) -> Result<SideTable, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(SideTable::parse(&mut LogWarn(path), &text)?)
}

fn decompress(input: &Path, output: &Path, table: &Path) -> Result<(), Box<dyn Error>> {
    let side = read_side_table(table)?;
    let payload = Payload {
        bytes: fs::read(input)?,
        padding: side.padding,
    };
    let symbols = huffman::decompress(&mut LogWarn(input), &side.frequencies, &payload)?;
    let text: String = symbols.into_iter().collect();
    fs::write(output, &text)?;
    info!(
        "{}: {} bytes -> {} symbols",
        input.display(),
        payload.bytes.len(),
        text.chars().count(),
    );
    Ok(())
}

fn codes(input: &Path) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(input)?;
    let frequencies = FrequencyTable::count(text.chars());
    if frequencies.is_empty() {
        return Ok(());
    }
    let tree = Tree::from_frequencies(&frequencies)?;
    for &(symbol, code) in CodeTable::from_tree(&tree).iter() {
        let count = frequencies.get(symbol).unwrap_or(0);
        println!("{:?} {} {}", symbol, count, code);
    }
    println!("total bits: {}", tree.weighted_path_length());
    Ok(())
}

fn dump(input: &Path, table: &Path) -> Result<(), Box<dyn Error>> {
    let side = read_side_table(table)?;
    let payload = Payload {
        bytes: fs::read(input)?,
        padding: side.padding,
    };
    println!(
        "symbols={} distinct={} bytes={} padding={} bits={}",
        side.frequencies.total(),
        side.frequencies.len(),
        payload.bytes.len(),
        payload.padding,
        payload.bit_len(),
    );
    for entry in &side.frequencies {
        println!("{:?} {}", entry.symbol, entry.count);
    }
    hexdump::hexdump(&payload.bytes);
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    match matches.subcommand() {
        ("compress", Some(m)) => {
            let input = Path::new(m.value_of_os("INPUT").unwrap());
            let output = Path::new(m.value_of_os("OUTPUT").unwrap());
            compress(input, output, &table_path(m, output))
        }
        ("decompress", Some(m)) => {
            let input = Path::new(m.value_of_os("INPUT").unwrap());
            let output = Path::new(m.value_of_os("OUTPUT").unwrap());
            decompress(input, output, &table_path(m, input))
        }
        ("codes", Some(m)) => codes(Path::new(m.value_of_os("INPUT").unwrap())),
        ("dump", Some(m)) => {
            let input = Path::new(m.value_of_os("INPUT").unwrap());
            dump(input, &table_path(m, input))
        }
        _ => unreachable!(),
    }
}

fn main() {
    logger::init();

    let table = Arg::with_name("TABLE")
        .long("table")
        .takes_value(true)
        .help("Path of the frequency table, defaults to the compressed file plus \".freq\"");
    let matches = App::new("Huffman text compressor")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("compress")
                .about("Compresses a UTF-8 text file")
                .arg(Arg::with_name("INPUT").help("Text file to read").required(true))
                .arg(Arg::with_name("OUTPUT").help("Compressed file to write").required(true))
                .arg(table.clone()),
        )
        .subcommand(
            SubCommand::with_name("decompress")
                .about("Restores a text file from its compressed form")
                .arg(Arg::with_name("INPUT").help("Compressed file to read").required(true))
                .arg(Arg::with_name("OUTPUT").help("Text file to write").required(true))
                .arg(table.clone()),
        )
        .subcommand(
            SubCommand::with_name("codes")
                .about("Prints the code of every character of a text file")
                .arg(Arg::with_name("INPUT").help("Text file to read").required(true)),
        )
        .subcommand(
            SubCommand::with_name("dump")
                .about("Prints the frequency table and a hexdump of a compressed file")
                .arg(Arg::with_name("INPUT").help("Compressed file to read").required(true))
                .arg(table),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
