use super::VERSION;
use crate::{Config, Field, Result, Source};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

fn app() -> App<'static, 'static> {
    let arg_input = Arg::with_name("input")
        .help("results file to plot, one line per file; PATH=LABEL sets the legend entry")
        .long_help(
            "results file to plot, one line per file; \
            the first line is a header and is ignored, then one trial per line: \
            threads,key_max,iters,time,time_serial. \
            PATH=LABEL sets the legend entry, otherwise the file stem is used",
        )
        .short("i")
        .long("input")
        .takes_value(true)
        .multiple(true)
        .number_of_values(1)
        .required(true);
    let arg_x = Arg::with_name("x_axis")
        .help("trial field on the x axis")
        .short("x")
        .long("x-axis")
        .takes_value(true)
        .possible_values(&Field::NAMES)
        .default_value("threads");
    let arg_y = Arg::with_name("y_axis")
        .help("trial field on the y axis")
        .short("y")
        .long("y-axis")
        .takes_value(true)
        .possible_values(&Field::NAMES)
        .default_value("time");
    let arg_consistent = Arg::with_name("consistent")
        .help("comma separated fields that must be equal in all trials, empty to skip the check")
        .short("c")
        .long("consistent")
        .takes_value(true)
        .empty_values(true)
        .default_value("key_max,iters");
    let arg_annotation = Arg::with_name("annotation")
        .help("free text added to the plot title")
        .short("a")
        .long("annotation")
        .takes_value(true)
        .default_value(crate::config::DEFAULT_ANNOTATION);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, overwritten if present")
        .long_help("name of the output file, overwritten if present; always png encoded, whatever the extension")
        .short("o")
        .long("output")
        .takes_value(true)
        .default_value(crate::config::DEFAULT_OUTPUT);
    let arg_width = Arg::with_name("width")
        .help("image width in pixels")
        .long("width")
        .takes_value(true)
        .validator(is_pixels)
        .default_value("1024");
    let arg_height = Arg::with_name("height")
        .help("image height in pixels")
        .long("height")
        .takes_value(true)
        .validator(is_pixels)
        .default_value("768");
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("trial_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to compare benchmark trial series in a line plot")
        .arg(arg_input)
        .arg(arg_x)
        .arg(arg_y)
        .arg(arg_consistent)
        .arg(arg_annotation)
        .arg(arg_pngout)
        .arg(arg_width)
        .arg(arg_height)
        .arg(arg_verbose)
}

fn is_pixels(v: String) -> std::result::Result<(), String> {
    match v.parse::<u32>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(format!("{} is not a positive number of pixels", v)),
    }
}

/// Comma separated field names; blank entries are ignored, repeated fields kept once.
pub fn parse_fields(list: &str) -> Result<Vec<Field>> {
    let mut fields: Vec<Field> = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let f: Field = name.parse()?;
        if !fields.contains(&f) {
            fields.push(f);
        }
    }
    Ok(fields)
}

fn config_from(cli_args: &ArgMatches) -> Result<Config> {
    let defaults = Config::default();
    let sources: Vec<Source> = cli_args
        .values_of("input")
        .map(|v| v.map(Source::from_arg).collect())
        .unwrap_or_default();
    let x_axis = match cli_args.value_of("x_axis") {
        Some(v) => v.parse()?,
        None => defaults.x_axis,
    };
    let y_axis = match cli_args.value_of("y_axis") {
        Some(v) => v.parse()?,
        None => defaults.y_axis,
    };
    let consistent = match cli_args.value_of("consistent") {
        Some(v) => parse_fields(v)?,
        None => defaults.consistent,
    };
    let annotation = cli_args
        .value_of("annotation")
        .map(String::from)
        .unwrap_or(defaults.annotation);
    let output = cli_args
        .value_of("output_pngfile")
        .map(PathBuf::from)
        .unwrap_or(defaults.output);
    let width = cli_args
        .value_of("width")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(defaults.size.0);
    let height = cli_args
        .value_of("height")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(defaults.size.1);
    Ok(Config {
        sources,
        x_axis,
        y_axis,
        consistent,
        annotation,
        output,
        size: (width, height),
    })
}

/// Takes the CLI arguments that control the comparison plot;
/// also returns whether verbose output was requested.
pub fn parse_cli() -> Result<(Config, bool)> {
    let cli_args = app().get_matches();
    let config = config_from(&cli_args)?;
    Ok((config, cli_args.is_present("verbose")))
}
