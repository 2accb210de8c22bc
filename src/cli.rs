// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The cli module parses command line arguments and dispatches them to the
//! solvers.
//!
//! Coordinates are given as `lat,lon` in decimal degrees with a period as
//! the decimal separator. Trailing whitespace and commas after a number are
//! tolerated for copy and paste convenience; NaN and infinite values are
//! rejected.

use crate::format::{self, HAVERSINE_DECIMALS, KARNEY_DECIMALS};
use crate::sample::PositionSampler;
use crate::{sphere, Formula, Metres};
use angle_sc::Degrees;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{debug, trace};
use unit_sphere::LatLong;

/// The number of metres in a kilometre, for the `--km` option.
const METRES_PER_KM: f64 = 1000.0;

/// The output format selected with `-F`/`--format`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Plain `lat,lon` and number lines.
    Default,
    /// GPX 1.1 waypoints and routes.
    Gpx,
    /// SQL insert statements.
    Sql,
}

/// The distance formula selected with `--formula`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormulaChoice {
    /// The spherical model.
    Haversine,
    /// The WGS 84 ellipsoidal model.
    Karney,
}

impl From<FormulaChoice> for Formula {
    fn from(choice: FormulaChoice) -> Self {
        match choice {
            FormulaChoice::Haversine => Self::Haversine,
            FormulaChoice::Karney => Self::Karney,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "geocalc",
    version,
    about = "Geodesic calculations on the WGS84 ellipsoid and sphere"
)]
pub struct Cli {
    /// Output in a specific format
    #[arg(short = 'F', long, value_enum, default_value = "default")]
    pub format: OutputFormat,

    /// Distance formula for the dist and bear commands
    #[arg(long, value_enum, default_value = "haversine")]
    pub formula: FormulaChoice,

    /// Use kilometers instead of meters for input and output
    #[arg(long)]
    pub km: bool,

    /// Seed for the random position generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of positions the randpos command generates
    #[arg(short = 'c', long, default_value_t = 1)]
    pub count: u64,

    /// Increase level of verbosity, can be repeated
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Be more quiet, can be repeated
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

// every positional allows a leading hyphen so that negative latitudes,
// bearings, distances and fractions parse as values, not options
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the initial compass bearing (0-360) between two points
    Bear {
        #[arg(allow_hyphen_values = true)]
        coor1: String,
        #[arg(allow_hyphen_values = true)]
        coor2: String,
    },
    /// Find the new position after moving a distance from a start position
    /// in a specific direction; a negative distance moves in the opposite
    /// direction of the bearing
    Bpos {
        #[arg(allow_hyphen_values = true)]
        coor: String,
        #[arg(allow_hyphen_values = true)]
        bearing: String,
        #[arg(allow_hyphen_values = true)]
        length: String,
    },
    /// Generate a list of intermediate points on a direct line between two
    /// locations
    Course {
        #[arg(allow_hyphen_values = true)]
        coor1: String,
        #[arg(allow_hyphen_values = true)]
        coor2: String,
        #[arg(allow_hyphen_values = true)]
        numpoints: String,
    },
    /// Calculate the distance between two points
    Dist {
        #[arg(allow_hyphen_values = true)]
        coor1: String,
        #[arg(allow_hyphen_values = true)]
        coor2: String,
    },
    /// Print the position at a fraction of the line between two positions;
    /// fractions below 0 or above 1 extrapolate beyond the end points
    Lpos {
        #[arg(allow_hyphen_values = true)]
        coor1: String,
        #[arg(allow_hyphen_values = true)]
        coor2: String,
        #[arg(allow_hyphen_values = true)]
        fracdist: String,
    },
    /// Generate random positions, optionally constrained to a minimum and
    /// maximum distance from a centre
    Randpos {
        #[arg(allow_hyphen_values = true)]
        coor: Option<String>,
        #[arg(allow_hyphen_values = true)]
        maxdist: Option<String>,
        #[arg(allow_hyphen_values = true)]
        mindist: Option<String>,
    },
}

/// Parse a number from a string.
///
/// Trailing whitespace and commas are allowed in case the value was pasted
/// from a coordinate list; NaN and infinite values are rejected.
fn parse_number(s: &str) -> Result<f64, String> {
    let t = s
        .trim_start()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace());
    let value: f64 = t.parse().map_err(|_| "Invalid number specified".to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("Invalid number specified".to_string())
    }
}

/// Parse a `lat,lon` position from a string.
///
/// The range check is left to the solvers, so an out of range position is
/// reported as "Value out of range" rather than a parse failure.
fn parse_position(s: &str) -> Result<LatLong, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| "Invalid number specified".to_string())?;
    let lat = parse_number(lat)?;
    let lon = parse_number(lon)?;
    Ok(LatLong::new(Degrees(lat), Degrees(lon)))
}

/// Render a list of positions in the selected output format.
/// `route` selects a GPX route instead of separate waypoints.
fn render_positions(format: OutputFormat, points: &[LatLong], route: bool) -> String {
    match format {
        OutputFormat::Default => {
            let mut text = String::new();
            for p in points {
                text.push_str(&format::format_position(p));
                text.push('\n');
            }
            text
        }
        OutputFormat::Gpx => {
            if route {
                format::gpx_document(&format::gpx_route(points))
            } else {
                let mut body = String::new();
                for (i, p) in points.iter().enumerate() {
                    body.push_str(&format::gpx_waypoint(p, &(i + 1).to_string(), None));
                }
                format::gpx_document(&body)
            }
        }
        OutputFormat::Sql => format::sql_document(points),
    }
}

/// Execute the `bear` and `dist` commands.
fn cmd_bear_dist(cli: &Cli, coor1: &str, coor2: &str) -> Result<String, String> {
    let a = parse_position(coor1)?;
    let b = parse_position(coor2)?;

    match &cli.command {
        Command::Bear { .. } => {
            let bearing =
                crate::bearing(cli.formula.into(), &a, &b).map_err(|e| e.to_string())?;
            Ok(format!(
                "{}\n",
                format::format_number(bearing.0, HAVERSINE_DECIMALS)
            ))
        }
        _ => {
            let decimals = match cli.formula {
                FormulaChoice::Haversine => HAVERSINE_DECIMALS,
                FormulaChoice::Karney => KARNEY_DECIMALS,
            };
            let distance =
                crate::distance(cli.formula.into(), &a, &b).map_err(|e| e.to_string())?;
            let value = if cli.km {
                distance.0 / METRES_PER_KM
            } else {
                distance.0
            };
            Ok(format!("{}\n", format::format_number(value, decimals)))
        }
    }
}

/// Execute the `bpos` command.
fn cmd_bpos(cli: &Cli, coor: &str, bearing: &str, length: &str) -> Result<String, String> {
    let a = parse_position(coor)?;
    let bearing = parse_number(bearing)?;
    let mut length = parse_number(length)?;
    if cli.km {
        length *= METRES_PER_KM;
    }

    let b = sphere::destination_position(&a, Degrees(bearing), Metres(length))
        .map_err(|e| e.to_string())?;
    Ok(render_positions(cli.format, &[b], false))
}

/// Execute the `course` command.
fn cmd_course(cli: &Cli, coor1: &str, coor2: &str, numpoints: &str) -> Result<String, String> {
    let a = parse_position(coor1)?;
    let b = parse_position(coor2)?;
    let numpoints = parse_number(numpoints)?;
    if numpoints < 0.0 {
        return Err("Value out of range".to_string());
    }

    // numpoints intermediate points plus both end points
    let last = numpoints + 1.0;
    let mut points = Vec::new();
    let mut i = 0.0;
    while i <= last {
        let p = sphere::route_position(&a, &b, i / last).map_err(|e| e.to_string())?;
        points.push(p);
        i += 1.0;
    }
    Ok(render_positions(cli.format, &points, true))
}

/// Execute the `lpos` command.
fn cmd_lpos(cli: &Cli, coor1: &str, coor2: &str, fracdist: &str) -> Result<String, String> {
    let a = parse_position(coor1)?;
    let b = parse_position(coor2)?;
    let fracdist = parse_number(fracdist)?;

    let p = sphere::route_position(&a, &b, fracdist).map_err(|e| e.to_string())?;
    Ok(render_positions(cli.format, &[p], false))
}

/// Execute the `randpos` command.
fn cmd_randpos(
    cli: &Cli,
    coor: Option<&str>,
    maxdist: Option<&str>,
    mindist: Option<&str>,
) -> Result<String, String> {
    let mut sampler = PositionSampler::new(cli.seed);
    let scale = if cli.km { METRES_PER_KM } else { 1.0 };

    let mut points = Vec::new();
    match coor {
        None => {
            for _ in 0..cli.count {
                points.push(sampler.uniform_position());
            }
        }
        Some(coor) => {
            let centre = parse_position(coor)?;
            let maxdist = maxdist.map_or(Ok(0.0), parse_number)? * scale;
            let mindist = mindist.map_or(Ok(0.0), parse_number)? * scale;
            for _ in 0..cli.count {
                let p = sampler
                    .annulus_position(&centre, Metres(maxdist), Metres(mindist))
                    .map_err(|e| e.to_string())?;
                points.push(p);
            }
        }
    }
    Ok(render_positions(cli.format, &points, false))
}

/// Execute the parsed command line.
///
/// returns the text to print on stdout, or the message to report on stderr
/// with a failure exit code.
pub fn run(cli: &Cli) -> Result<String, String> {
    debug!("format {:?} formula {:?} km {}", cli.format, cli.formula, cli.km);
    trace!("command {:?}", cli.command);

    match &cli.command {
        Command::Bear { coor1, coor2 } | Command::Dist { coor1, coor2 } => {
            cmd_bear_dist(cli, coor1, coor2)
        }
        Command::Bpos {
            coor,
            bearing,
            length,
        } => cmd_bpos(cli, coor, bearing, length),
        Command::Course {
            coor1,
            coor2,
            numpoints,
        } => cmd_course(cli, coor1, coor2, numpoints),
        Command::Lpos {
            coor1,
            coor2,
            fracdist,
        } => cmd_lpos(cli, coor1, coor2, fracdist),
        Command::Randpos {
            coor,
            maxdist,
            mindist,
        } => cmd_randpos(cli, coor.as_deref(), maxdist.as_deref(), mindist.as_deref()),
    }
}
