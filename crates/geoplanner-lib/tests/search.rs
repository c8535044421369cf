mod common;

use common::{fixture_map, map_of, point, route};
use geoplanner_lib::{find_path, Error, ErrorKind, Map, PathSearch, PathStep, PointId, RouteId};

fn origin(id: &str) -> PathStep {
    PathStep::origin(PointId::parse(id).unwrap())
}

fn via(route: &str, id: &str) -> PathStep {
    PathStep::via(RouteId::parse(route).unwrap(), PointId::parse(id).unwrap())
}

fn colinear_map(with_shortcut: bool) -> Map {
    let mut routes = vec![route("AB", "A", "B", 10.0), route("BC", "B", "C", 10.0)];
    if with_shortcut {
        routes.push(route("AC", "A", "C", 5.0));
    }
    map_of(
        vec![
            point("A", 0.0, 0.0),
            point("B", 0.0, 1.0),
            point("C", 0.0, 2.0),
            point("D", 10.0, 10.0),
        ],
        routes,
    )
}

#[test]
fn two_hop_path_through_middle_point() {
    let map = colinear_map(false);
    let outcome = find_path(&map, "A", "C").expect("search runs");

    assert_eq!(outcome.length, 20.0);
    assert_eq!(
        outcome.path.steps(),
        &[origin("A"), via("AB", "B"), via("BC", "C")]
    );
    assert_eq!(outcome.open_count, 0);
    assert_eq!(outcome.closed_count, 3);
}

#[test]
fn direct_route_beats_two_hops() {
    let map = colinear_map(true);
    let outcome = find_path(&map, "A", "C").expect("search runs");

    assert_eq!(outcome.length, 5.0);
    assert_eq!(outcome.path.steps(), &[origin("A"), via("AC", "C")]);
    assert_eq!(outcome.open_count, 1, "B is still waiting in the open set");
    assert_eq!(outcome.closed_count, 2);
}

#[test]
fn isolated_point_has_no_path() {
    let map = colinear_map(false);
    let outcome = find_path(&map, "A", "D").expect("no path is not an error");

    assert!(!outcome.found());
    assert_eq!(outcome.length, -1.0);
    assert!(outcome.path.is_empty());
    assert_eq!(outcome.open_count, 0);
    assert_eq!(outcome.closed_count, 3, "A, B and C were explored");
}

#[test]
fn origin_equals_destination() {
    let map = colinear_map(false);
    let outcome = find_path(&map, "B", "B").expect("search runs");

    assert_eq!(outcome.length, 0.0);
    assert_eq!(outcome.path.steps(), &[origin("B")]);
    assert_eq!(outcome.closed_count, 1);
}

#[test]
fn cheaper_candidate_replaces_open_node() {
    let map = map_of(
        vec![
            point("O", 0.0, 0.0),
            point("M", 0.0, 1.0),
            point("D", 0.0, 2.0),
        ],
        vec![
            route("OD", "O", "D", 1000.0),
            route("OM", "O", "M", 120.0),
            route("MD", "M", "D", 120.0),
        ],
    );
    let outcome = find_path(&map, "O", "D").expect("search runs");

    assert_eq!(outcome.length, 240.0);
    assert_eq!(
        outcome.path.steps(),
        &[origin("O"), via("OM", "M"), via("MD", "D")]
    );
    assert_eq!(outcome.open_count, 0);
    assert_eq!(outcome.closed_count, 3);
}

/// Two mirror-image detours with identical costs; only insertion order differs.
fn diamond(x_first: bool) -> Map {
    let mut routes = vec![route("OX", "O", "X", 200.0), route("OY", "O", "Y", 200.0)];
    if !x_first {
        routes.reverse();
    }
    routes.push(route("XD", "X", "D", 200.0));
    routes.push(route("YD", "Y", "D", 200.0));
    map_of(
        vec![
            point("O", 0.0, 0.0),
            point("X", 1.0, 1.0),
            point("Y", -1.0, 1.0),
            point("D", 0.0, 2.0),
        ],
        routes,
    )
}

#[test]
fn equal_cost_ties_pop_the_newest_node_first() {
    let outcome = find_path(&diamond(true), "O", "D").expect("search runs");
    assert_eq!(outcome.length, 400.0);
    assert_eq!(
        outcome.path.steps(),
        &[origin("O"), via("OY", "Y"), via("YD", "D")]
    );
    assert_eq!(outcome.closed_count, 4);

    let outcome = find_path(&diamond(false), "O", "D").expect("search runs");
    assert_eq!(
        outcome.path.steps(),
        &[origin("O"), via("OX", "X"), via("XD", "D")]
    );
}

#[test]
fn repeated_searches_give_identical_results() {
    let map = fixture_map();
    let search = PathSearch::new(&map);
    let first = search.search("FOR", "MCZ").expect("search runs");
    let second = search.search("FOR", "MCZ").expect("search runs");
    assert_eq!(first, second);
}

#[test]
fn fixture_prefers_coastal_highway() {
    let map = fixture_map();
    let outcome = find_path(&map, "NAT", "MCZ").expect("search runs");

    assert_eq!(outcome.length, 590.0);
    assert_eq!(
        outcome.path.steps(),
        &[
            origin("NAT"),
            via("R01", "JPA"),
            via("R02", "REC"),
            via("R03", "MCZ"),
        ]
    );
}

#[test]
fn fixture_long_haul_crosses_the_state_line() {
    let map = fixture_map();
    let outcome = find_path(&map, "FOR", "REC").expect("search runs");
    assert_eq!(outcome.length, 828.0);
    assert_eq!(outcome.path.hop_count(), 4);
}

#[test]
fn fixture_island_is_unreachable() {
    let map = fixture_map();
    let outcome = find_path(&map, "NAT", "FEN").expect("search runs");
    assert_eq!(outcome.length, -1.0);
    assert_eq!(outcome.open_count, 0);
    assert_eq!(outcome.closed_count, 7);
}

#[test]
fn path_lengths_match_route_sums() {
    let map = fixture_map();
    for from in map.points() {
        for to in map.points() {
            let outcome = find_path(&map, from.id.as_str(), to.id.as_str()).expect("search runs");
            if outcome.found() {
                assert_eq!(outcome.path.total_length(&map).unwrap(), outcome.length);
                assert_eq!(outcome.path.origin(), Some(&from.id));
                assert_eq!(outcome.path.destination(), Some(&to.id));
            } else {
                assert_eq!(outcome.length, -1.0);
                assert_eq!(outcome.open_count, 0);
            }
        }
    }
}

#[test]
fn unknown_endpoints_are_invalid_arguments() {
    let map = fixture_map();

    let err = find_path(&map, "XXX", "NAT").expect_err("unknown origin");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = find_path(&map, "NAT", "Recif").expect_err("unknown destination");
    assert!(matches!(err, Error::UnknownPoint { .. }));
    assert!(err.to_string().contains("Did you mean"));
    assert!(err.to_string().contains("REC"));
}

#[test]
fn empty_map_is_an_invalid_argument() {
    let err = find_path(&Map::default(), "A", "B").expect_err("empty map");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn distances_are_symmetric_and_zero_on_the_diagonal() {
    let map = fixture_map();
    for a in map.points() {
        assert_eq!(a.distance_to(a).unwrap(), 0.0);
        for b in map.points() {
            assert_eq!(a.distance_to(b).unwrap(), b.distance_to(a).unwrap());
        }
    }
}
