//! Reading and writing maps in the Railroad Barons map file format.
//!
//! A map file lists one station per line, as `id row col name` (the name runs until
//! the end of the line), then a `##ROUTES##` line, then one route per line, as
//! `origin destination BARON`:
//! ```text
//! 0 0 0 Albany
//! 1 0 4 Boston
//! 2 3 0 New York
//! ##ROUTES##
//! 0 1 UNCLAIMED
//! 0 2 RED
//! ```

use crate::baron::Baron;
use crate::error::MapError;
use crate::map::{Map, MapBuilder, StationId};
use crate::space::Station;

use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Separates the stations from the routes.
pub const ROUTES_SENTINEL: &str = "##ROUTES##";

/// Loads a map from `input`.
///
/// Reading stops at the end of the input, or at the first line that cannot be parsed
/// (or describes an invalid station or route): the map then holds everything read before.
/// Routes owned by a baron are claimed by that baron on the returned map.
///
/// Only fails if reading from `input` does.
pub fn read_map(input: impl BufRead) -> Result<Map, MapError> {
    let mut builder = Map::builder();
    let mut reading_routes = false;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if !reading_routes && line.trim() == ROUTES_SENTINEL {
            reading_routes = true;
            continue;
        }

        let added = if reading_routes {
            add_route_line(&mut builder, &line)
        } else {
            add_station_line(&mut builder, &line)
        };

        match added {
            Some(Ok(())) => {}
            Some(Err(err)) => {
                warn!("Stopped reading the map at line {}: {}", line_number, err);
                break;
            }
            None => {
                warn!(
                    "Stopped reading the map at line {}, which is malformed: {:?}",
                    line_number, line
                );
                break;
            }
        }
    }

    let map = builder.build();
    debug!(
        "Read a map with {} stations and {} routes.",
        map.stations().count(),
        map.routes().len()
    );

    Ok(map)
}

/// `None` if the line is malformed.
///
/// Fields may be separated by any run of whitespace. The name is the rest of the line
/// and keeps its inner spaces.
fn add_station_line(builder: &mut MapBuilder, line: &str) -> Option<Result<(), MapError>> {
    let (id, rest) = next_field(line)?;
    let (row, rest) = next_field(rest)?;
    let (col, rest) = next_field(rest)?;

    let id: StationId = id.parse().ok()?;
    let row = row.parse().ok()?;
    let col = col.parse().ok()?;
    let name = rest.trim();
    if name.is_empty() {
        return None;
    }

    Some(builder.add_station(id, Station::new(name, row, col)))
}

/// Splits the first whitespace-delimited field off `rest`.
fn next_field(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim_start();
    if rest.is_empty() {
        return None;
    }

    Some(rest.split_once(char::is_whitespace).unwrap_or((rest, "")))
}

/// `None` if the line is malformed.
fn add_route_line(builder: &mut MapBuilder, line: &str) -> Option<Result<(), MapError>> {
    let mut fields = line.split_whitespace();

    let origin: StationId = fields.next()?.parse().ok()?;
    let destination: StationId = fields.next()?.parse().ok()?;
    let baron: Baron = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    Some(builder.add_route(origin, destination, baron).map(drop))
}

/// Writes `map` to `output`, in the format read by [`read_map`].
///
/// Stations are written in id order, and routes along with their current baron.
pub fn write_map(map: &Map, mut output: impl Write) -> Result<(), MapError> {
    for (id, station) in map.stations() {
        writeln!(
            output,
            "{} {} {} {}",
            id,
            station.row(),
            station.col(),
            station.name()
        )?;
    }

    writeln!(output, "{}", ROUTES_SENTINEL)?;

    for route in map.routes() {
        writeln!(
            output,
            "{} {} {}",
            route.origin(),
            route.destination(),
            route.baron()
        )?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Orientation;
    use pretty_assertions::assert_eq;
    use std::io::{self, BufReader, Read};

    const SAMPLE_MAP: &str = "\
0 0 0 Albany
1 0 4 Boston
2 3 0 New York
3 3 6 Philadelphia
##ROUTES##
0 1 UNCLAIMED
0 2 RED
2 3 UNCLAIMED
";

    fn read_str(input: &str) -> Map {
        read_map(input.as_bytes()).unwrap()
    }

    fn write_string(map: &Map) -> String {
        let mut output = Vec::new();
        write_map(map, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn read_sample_map() {
        let map = read_str(SAMPLE_MAP);

        assert_eq!(map.rows(), 4);
        assert_eq!(map.cols(), 7);
        assert_eq!(map.stations().count(), 4);
        assert_eq!(map.station(2).map(Station::name), Some("New York"));

        let routes = map.routes();
        assert_eq!(routes.len(), 3);
        assert_eq!(
            (routes[0].origin(), routes[0].destination(), routes[0].length()),
            (0, 1, 3)
        );
        assert_eq!(routes[0].orientation(), Orientation::Horizontal);
        assert_eq!(routes[1].orientation(), Orientation::Vertical);
        assert_eq!(routes[1].length(), 2);
        assert_eq!(routes[2].length(), 5);
    }

    #[test]
    fn read_restores_claims() {
        let map = read_str(SAMPLE_MAP);

        let barons: Vec<_> = map.routes().iter().map(|route| route.baron()).collect();
        assert_eq!(barons, vec![Baron::Unclaimed, Baron::Red, Baron::Unclaimed]);
        assert!(map.routes()[1]
            .tracks()
            .iter()
            .all(|track| track.baron() == Baron::Red));
        assert_eq!(map.shortest_unclaimed_length(), Some(3));
    }

    #[test]
    fn write_sample_map() {
        assert_eq!(write_string(&read_str(SAMPLE_MAP)), SAMPLE_MAP);
    }

    #[test]
    fn written_map_reads_back() {
        let mut map = read_str(SAMPLE_MAP);
        assert!(map
            .route_mut(crate::route::RouteId(2))
            .unwrap()
            .claim(Baron::Yellow));

        let written = write_string(&map);
        let read_back = read_str(&written);

        assert_eq!(read_back.routes(), map.routes());
        assert_eq!(
            read_back.stations().collect::<Vec<_>>(),
            map.stations().collect::<Vec<_>>()
        );
        assert!(written.ends_with("2 3 YELLOW\n"));
    }

    #[test]
    fn barons_are_case_insensitive() {
        let map = read_str("0 0 0 A\n1 0 3 B\n##ROUTES##\n0 1 green\n");
        assert_eq!(map.routes()[0].baron(), Baron::Green);
    }

    #[test]
    fn truncated_routes_keep_previous_lines() {
        let map = read_str(
            "0 0 0 Albany\n1 0 4 Boston\n2 3 0 New York\n##ROUTES##\n0 1 UNCLAIMED\n0 2",
        );

        assert_eq!(map.stations().count(), 3);
        assert_eq!(map.routes().len(), 1);
    }

    #[test]
    fn truncated_stations_keep_previous_lines() {
        let map = read_str("0 0 0 Albany\n1 0 4 Boston\n2 3");

        assert_eq!(map.stations().count(), 2);
        assert!(map.routes().is_empty());
        assert_eq!((map.rows(), map.cols()), (1, 5));
    }

    #[test]
    fn station_fields_split_on_any_whitespace() {
        let map = read_str("0\t0\t0 Albany\n1  0 4\t\tBoston\n 2 3   0  New  York \n##ROUTES##\n0 1 UNCLAIMED\n");

        assert_eq!(map.stations().count(), 3);
        assert_eq!(map.station(0).map(Station::name), Some("Albany"));
        assert_eq!(map.station(1).map(Station::name), Some("Boston"));
        assert_eq!(map.station(2).map(Station::name), Some("New  York"));
        assert_eq!(map.station(2).map(|station| (station.row(), station.col())), Some((3, 0)));
        assert_eq!(map.routes().len(), 1);
        assert_eq!(map.routes()[0].length(), 3);
    }

    #[test]
    fn huge_coordinates_stop_reading() {
        let map = read_str(&format!(
            "0 0 0 Albany\n1 {} 0 Boston\n2 0 {} Chicago\n##ROUTES##\n",
            usize::MAX,
            usize::MAX
        ));

        assert_eq!(map.stations().count(), 1);
        assert_eq!((map.rows(), map.cols()), (1, 1));
    }

    #[test]
    fn invalid_route_stops_reading() {
        // Station 1 and 2 are neither on the same row nor column.
        let map = read_str(
            "0 0 0 Albany\n1 0 4 Boston\n2 3 0 New York\n##ROUTES##\n0 1 BLUE\n1 2 UNCLAIMED\n0 2 UNCLAIMED\n",
        );

        assert_eq!(map.routes().len(), 1);
        assert_eq!(map.routes()[0].baron(), Baron::Blue);
    }

    #[test]
    fn unknown_baron_stops_reading() {
        let map = read_str("0 0 0 A\n1 0 3 B\n##ROUTES##\n0 1 PURPLE\n");
        assert!(map.routes().is_empty());
    }

    #[test]
    fn empty_input() {
        let map = read_str("");
        assert_eq!((map.rows(), map.cols()), (0, 0));
        assert_eq!(write_string(&map), "##ROUTES##\n");
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn read_error_fails() {
        assert!(matches!(
            read_map(BufReader::new(BrokenReader)),
            Err(MapError::Io(_))
        ));
    }
}
