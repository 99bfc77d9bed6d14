use super::items::RequestFeature;

const REQUEST_PARAM: &str = "request=";

/// Query portion of a location: the text between the first `?` and any `#`.
///
/// # Example
///
/// ```
/// use request_map::request::search_of;
///
/// assert_eq!(search_of("/delivery-needed?request=ABC#map"), "request=ABC");
/// assert_eq!(search_of("/delivery-needed"), "");
/// ```
pub fn search_of(location: &str) -> &str {
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.find('?') {
        Some(idx) => &without_fragment[idx + 1..],
        None => "",
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn request_value(token: &str) -> Option<&str> {
    let idx = token.find(REQUEST_PARAM)?;
    let value = &token[idx + REQUEST_PARAM.len()..];
    value.split(is_line_terminator).next()
}

/// Extract the requested code from a query string.
///
/// The query is split into `&` separated tokens, a single leading `?` is
/// dropped. Any token containing `request=` carries a code (everything after
/// it, up to the end of the line), and the last such token wins. An empty string means no code was
/// requested. Values are not percent-decoded.
///
/// # Example
///
/// ```
/// use request_map::request::extract_request_code;
///
/// assert_eq!(extract_request_code("foo=1&request=ABC123&bar=2"), "ABC123");
/// assert_eq!(extract_request_code("?request=A&request=B"), "B");
/// assert_eq!(extract_request_code(""), "");
/// ```
pub fn extract_request_code(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(request_value)
        .last()
        .unwrap_or_default()
        .to_string()
}

/// Find the first feature carrying `code`.
///
/// Collections are searched in the order given, so callers must pass them in
/// precedence order (`requests` before `drivingClusterRequests`).
pub fn resolve_request<'a>(
    code: &str,
    collections: &[&'a [RequestFeature]],
) -> Option<&'a RequestFeature> {
    collections
        .iter()
        .flat_map(|features| features.iter())
        .find(|feature| feature.code.as_str() == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::items::Collection;

    fn feature(code: &str, collection: Collection, lon: f64) -> RequestFeature {
        RequestFeature::new(code, collection, GeoPoint::new(lon, 40.67))
    }

    #[test]
    fn empty_query() {
        assert_eq!(extract_request_code(""), "");
        assert_eq!(extract_request_code("?"), "");
    }

    #[test]
    fn code_between_other_params() {
        assert_eq!(extract_request_code("foo=1&request=ABC123&bar=2"), "ABC123");
    }

    #[test]
    fn last_match_wins() {
        assert_eq!(extract_request_code("request=A&request=B"), "B");
        assert_eq!(extract_request_code("request=A&foo=bar"), "A");
    }

    #[test]
    fn leading_question_mark() {
        assert_eq!(extract_request_code("?request=XYZ"), "XYZ");
        // only one is stripped
        assert_eq!(extract_request_code("??request=XYZ"), "XYZ");
        assert_eq!(extract_request_code("?foo=1"), "");
    }

    #[test]
    fn unanchored_match() {
        assert_eq!(extract_request_code("subrequest=77"), "77");
        assert_eq!(extract_request_code("request=a=b"), "a=b");
        assert_eq!(extract_request_code("request=A&request="), "");
    }

    #[test]
    fn value_ends_at_line_break() {
        assert_eq!(extract_request_code("request=A\nB"), "A");
        assert_eq!(extract_request_code("request=A\r\n&foo=1"), "A");
        assert_eq!(extract_request_code("request=\nB"), "");
        assert_eq!(extract_request_code("x\nrequest=C\u{2028}D"), "C");
    }

    #[test]
    fn no_percent_decoding() {
        assert_eq!(extract_request_code("request=A%20B"), "A%20B");
    }

    #[test]
    fn search_portion() {
        assert_eq!(search_of("https://example.org/map?request=Q&x=1"), "request=Q&x=1");
        assert_eq!(search_of("https://example.org/map?request=Q#top"), "request=Q");
        assert_eq!(search_of("https://example.org/map#a?request=Q"), "");
        assert_eq!(search_of("?request=Q"), "request=Q");
        assert_eq!(search_of(""), "");
    }

    #[test]
    fn resolve_in_empty_collections() {
        let empty: &[RequestFeature] = &[];
        assert_eq!(resolve_request("X", &[empty, empty]), None);
    }

    #[test]
    fn first_collection_wins() {
        let requests = vec![feature("A", Collection::Requests, -73.9)];
        let driving = vec![feature("A", Collection::DrivingClusterRequests, -73.8)];
        let found = resolve_request("A", &[requests.as_slice(), driving.as_slice()]).unwrap();
        assert_eq!(found.collection, Collection::Requests);
        assert_eq!(found, &requests[0]);
    }

    #[test]
    fn first_match_within_collection() {
        let driving = vec![
            feature("B", Collection::DrivingClusterRequests, -73.8),
            feature("C", Collection::DrivingClusterRequests, -73.7),
            feature("C", Collection::DrivingClusterRequests, -73.6),
        ];
        let empty: &[RequestFeature] = &[];
        let found = resolve_request("C", &[empty, driving.as_slice()]).unwrap();
        assert_eq!(found.location.lon, -73.7);
    }

    #[test]
    fn codes_match_exactly() {
        let requests = vec![feature("abc", Collection::Requests, -73.9)];
        let collections = [requests.as_slice()];
        assert_eq!(resolve_request("ABC", &collections), None);
        assert_eq!(resolve_request("ab", &collections), None);
        assert!(resolve_request("abc", &collections).is_some());
    }
}
