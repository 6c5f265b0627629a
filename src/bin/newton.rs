// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate newton_fractal;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use newton_fractal::animation::{Animation, DEFAULT_FRAME_DELAY_MS};
use newton_fractal::output::{check_animation_path, write_animation, write_image};
use newton_fractal::presets::{self, Preset};
use newton_fractal::{Config, NewtonRenderer};
use std::path::Path;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const PRESET: &str = "preset";
const LIST: &str = "list";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const TOLERANCE: &str = "tolerance";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";

fn args<'a>() -> ArgMatches<'a> {
    App::new("newton")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Newton's method fractal renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(LIST)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; animations must be .gif"),
        )
        .arg(
            Arg::with_name(PRESET)
                .long(PRESET)
                .short("p")
                .takes_value(true)
                .default_value("cubic")
                .validator(|s| match presets::find(&s) {
                    Some(_) => Ok(()),
                    None => Err(format!("No preset named '{}'; try --list", s)),
                })
                .help("Which fractal to render"),
        )
        .arg(
            Arg::with_name(LIST)
                .long(LIST)
                .short("L")
                .help("List the available presets and exit"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the viewport (default: the preset's)"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the viewport (default: the preset's)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 1024",
                    )
                })
                .help(
                    "Segments rendered in parallel; must divide the width (default: one per CPU)",
                ),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Maximum Newton steps per pixel"),
        )
        .arg(
            Arg::with_name(TOLERANCE)
                .long(TOLERANCE)
                .takes_value(true)
                .default_value("0.000001")
                .validator(|s| {
                    validate_range(
                        &s,
                        1e-15,
                        1.0,
                        "Could not parse tolerance",
                        "Tolerance must be between 1e-15 and 1",
                    )
                })
                .help("Distance at which a point counts as having reached a root"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .long(FRAMES)
                .short("f")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 10000",
                    )
                })
                .help("Frames in an animation (default: the preset's)"),
        )
        .arg(
            Arg::with_name(DELAY)
                .long(DELAY)
                .short("d")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        60_000,
                        "Could not parse frame delay",
                        "Frame delay must be between 1 and 60000 milliseconds",
                    )
                })
                .help("Milliseconds between animation frames"),
        )
        .get_matches()
}

// Values below have all been through their validators.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(raw).map_err(|_| format_err!("Could not parse --{} value '{}'", name, raw))
}

fn pair<T: FromStr>(
    matches: &ArgMatches,
    name: &str,
    separator: char,
) -> Result<Option<(T, T)>, Error> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(raw) => parse_pair(raw, separator)
            .map(Some)
            .ok_or_else(|| format_err!("Could not parse --{} value '{}'", name, raw)),
    }
}

fn configure(matches: &ArgMatches, preset: &Preset) -> Result<Config, Error> {
    let mut settings = preset.settings();
    let (width, height): (u16, u16) = pair(matches, SIZE, 'x')?.unwrap_or((1920, 1080));
    settings.width = width as usize;
    settings.height = height as usize;
    if let Some((re, im)) = pair::<f64>(matches, LEFTLOWER, ',')? {
        settings.x_range.0 = re;
        settings.y_range.0 = im;
    }
    if let Some((re, im)) = pair::<f64>(matches, RIGHTUPPER, ',')? {
        settings.x_range.1 = re;
        settings.y_range.1 = im;
    }
    settings.workers = if matches.is_present(THREADS) {
        value(matches, THREADS)?
    } else {
        num_cpus::get()
    };
    settings.max_iterations = value(matches, ITERATIONS)?;
    settings.tolerance = value(matches, TOLERANCE)?;
    if matches.is_present(FRAMES) {
        settings.frames = value(matches, FRAMES)?;
    }
    Ok(Config::new(settings)?)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    if matches.is_present(LIST) {
        for preset in presets::all() {
            let kind = if preset.is_animated() { "animation" } else { "image" };
            println!("{:12} {:10} {}", preset.name, kind, preset.about);
        }
        return Ok(());
    }

    let preset: Preset = presets::find(&value::<String>(matches, PRESET)?)
        .ok_or_else(|| format_err!("Unknown preset"))?;
    let output: String = value(matches, OUTPUT)?;
    let output = Path::new(&output);

    // Every configuration problem is reported before any work starts.
    let config = configure(matches, &preset)?;
    if preset.is_animated() {
        check_animation_path(output)?;
    }

    info!(
        "rendering '{}' at {}x{} on {} workers",
        preset.name,
        config.width(),
        config.height(),
        config.workers()
    );
    let renderer = NewtonRenderer::new(config, preset.function(), preset.colorizer);

    match preset.animation {
        Some((update, _)) => {
            let delay = if matches.is_present(DELAY) {
                value(matches, DELAY)?
            } else {
                DEFAULT_FRAME_DELAY_MS
            };
            let frames = Animation::new(renderer, update).render_frames()?;
            write_animation(output, frames, delay)
        }
        None => write_image(output, renderer.image()?),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
