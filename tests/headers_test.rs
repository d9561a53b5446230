use xhrnet::http::headers::{parse_raw_headers, serialize, to_header_map, HeaderTuple};
use xhrnet::http::Headers;

fn encode(headers: &Headers) -> Vec<HeaderTuple> {
    let mut out = Vec::new();
    serialize(headers, |n, v| out.push((n.to_owned(), v.to_owned())));
    out
}

fn raw_blob(tuples: &[HeaderTuple]) -> String {
    tuples
        .iter()
        .map(|(n, v)| format!("{n}: {v}\r\n"))
        .collect()
}

#[test]
fn test_headers_round_trip_with_duplicates() {
    let mut headers = Headers::new();
    headers.insert("Content-Type", "text/plain");
    headers.insert("Accept", vec!["text/html", "application/json"]);
    headers.insert("X-Trace", "abc");

    let encoded = encode(&headers);
    let decoded = parse_raw_headers(&raw_blob(&encoded));

    assert_eq!(decoded, encoded);
    assert_eq!(
        decoded,
        vec![
            ("Content-Type".to_owned(), "text/plain".to_owned()),
            ("Accept".to_owned(), "text/html".to_owned()),
            ("Accept".to_owned(), "application/json".to_owned()),
            ("X-Trace".to_owned(), "abc".to_owned()),
        ]
    );
}

#[test]
fn test_parse_preserves_transport_order() {
    let raw = "date: Mon, 01 Jan 2024 00:00:00 GMT\r\nz: 1\r\na: 2\r\nz: 3\r\n";
    let names: Vec<_> = parse_raw_headers(raw).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["date", "z", "a", "z"]);
}

#[test]
fn test_parse_value_keeps_inner_colons() {
    let tuples = parse_raw_headers("date: Mon, 01 Jan 2024 00:00:00 GMT");
    assert_eq!(tuples[0].1, "Mon, 01 Jan 2024 00:00:00 GMT");
}

#[test]
fn test_header_map_from_parsed() {
    let tuples = parse_raw_headers("Content-Length: 5\nVary: a\nVary: b\n");
    let map = to_header_map(&tuples);
    assert_eq!(map.get("content-length").unwrap(), "5");
    assert_eq!(map.get_all("vary").iter().count(), 2);
}

#[test]
fn test_headers_from_iterator() {
    let headers: Headers = [("A", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
    assert_eq!(encode(&headers), vec![
        ("A".to_owned(), "3".to_owned()),
        ("b".to_owned(), "2".to_owned()),
    ]);
}
