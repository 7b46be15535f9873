use mouse::term::{self, Config};
use std::env;
use std::process::exit;

const USAGE: &str = "\
mouse16 - a concatenative stack-based language

Usage: mouse16 [ -t ] [ -s | -v ] [ SCRIPT... ]

Options:

    -t,        --trace      show a detailed, realtime traceback
    -s,        --silent     don't print errors or warnings
    -v,        --verbose    log everything
    -h,        --help       print this help & exit
               --version    print the version then exit

Omission of all above arguments will result in reading from STDIN.";

fn main() {
    let mut config = Config::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-t" | "--trace" => config.trace = true,
            "-s" | "--silent" => config.silent = true,
            "-v" | "--verbose" => config.verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            "--version" => {
                println!("mouse16 {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                eprintln!("unknown option: {}\n\n{}", flag, USAGE);
                exit(2);
            }
            script => config.files.push(script.to_string()),
        }
    }
    term::main(config);
}
