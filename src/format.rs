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

//! The format module renders positions, bearings and distances as plain
//! text lines, GPX 1.1 documents or SQL insert statements.
//!
//! All presentation rounding happens here; the solvers return full
//! precision values.

use std::fmt::Write as _;
use unit_sphere::LatLong;

/// The number of output decimals for coordinates, bearings and spherical
/// distances.
pub const HAVERSINE_DECIMALS: usize = 6;

/// The number of output decimals for ellipsoidal distances.
pub const KARNEY_DECIMALS: usize = 8;

/// Round a value to a number of decimals.
#[must_use]
pub fn round_number(value: f64, decimals: u32) -> f64 {
    let scale = libm::pow(10.0, f64::from(decimals));
    libm::round(value * scale) / scale
}

/// Format a number with a fixed number of decimals.
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Format a number with [`HAVERSINE_DECIMALS`] decimals and the trailing
/// zeros trimmed, for attribute values in GPX and SQL output.
#[must_use]
pub fn format_trimmed(value: f64) -> String {
    let text = format_number(value, HAVERSINE_DECIMALS);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Format a position as a `lat,lon` line with [`HAVERSINE_DECIMALS`]
/// decimals.
#[must_use]
pub fn format_position(a: &LatLong) -> String {
    format!(
        "{},{}",
        format_number(a.lat().0, HAVERSINE_DECIMALS),
        format_number(a.lon().0, HAVERSINE_DECIMALS)
    )
}

/// Escape the XML metacharacters `&`, `<` and `>` in a text.
#[must_use]
pub fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format a position as a GPX waypoint element.
/// `name` is shown on the map and `cmt` is a short description of the
/// waypoint; both are escaped. A None `cmt` suppresses the `<cmt>` element.
#[must_use]
pub fn gpx_waypoint(a: &LatLong, name: &str, cmt: Option<&str>) -> String {
    let mut wpt = format!(
        "  <wpt lat=\"{}\" lon=\"{}\">\n    <name>{}</name>\n",
        format_trimmed(a.lat().0),
        format_trimmed(a.lon().0),
        xml_escape(name)
    );
    if let Some(cmt) = cmt {
        let _ = writeln!(wpt, "    <cmt>{}</cmt>", xml_escape(cmt));
    }
    wpt.push_str("  </wpt>\n");
    wpt
}

/// Format a list of positions as a GPX route element.
#[must_use]
pub fn gpx_route(points: &[LatLong]) -> String {
    let mut rte = String::from("  <rte>\n");
    for p in points {
        let _ = writeln!(
            rte,
            "    <rtept lat=\"{}\" lon=\"{}\" />",
            format_trimmed(p.lat().0),
            format_trimmed(p.lon().0)
        );
    }
    rte.push_str("  </rte>\n");
    rte
}

/// Wrap GPX elements in a GPX 1.1 document.
#[must_use]
pub fn gpx_document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"geocalc\" \
         xmlns=\"http://www.topografix.com/GPX/1/1\">\n\
         {body}</gpx>\n"
    )
}

/// Format a list of positions as a transaction of SQL insert statements.
#[must_use]
pub fn sql_document(points: &[LatLong]) -> String {
    let mut sql = String::from(
        "BEGIN TRANSACTION;\n\
         CREATE TABLE IF NOT EXISTS coor (lat REAL, lon REAL);\n",
    );
    for p in points {
        let _ = writeln!(
            sql,
            "INSERT INTO coor (lat, lon) VALUES ({}, {});",
            format_trimmed(p.lat().0),
            format_trimmed(p.lon().0)
        );
    }
    sql.push_str("COMMIT;\n");
    sql
}
