use axum::extract::FromRequestParts;
use http::{header::ACCEPT, request::Parts, HeaderMap};
use mime::Mime;
use tackboard_error::{tackboard_error, Error, ErrorType};

/// Representation of a response, negotiated via the `Accept` header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Html,
    Json,
}

/// Quality the client assigned to the media type
///
/// The most specific matching media range wins. Unmatched media types have a quality of zero.
fn quality(ranges: &[Mime], target: &Mime) -> f32 {
    let mut best: Option<(u8, f32)> = None;

    for range in ranges {
        let specificity = if range.type_() == mime::STAR && range.subtype() == mime::STAR {
            0
        } else if range.type_() != target.type_() {
            continue;
        } else if range.subtype() == mime::STAR {
            1
        } else if range.subtype() == target.subtype() {
            2
        } else {
            continue;
        };

        let quality = range
            .get_param("q")
            .and_then(|value| value.as_str().parse::<f32>().ok())
            .unwrap_or(1.0);

        if best.map_or(true, |(current, _)| specificity > current) {
            best = Some((specificity, quality));
        }
    }

    best.map_or(0.0, |(_, quality)| quality)
}

impl Format {
    /// Pick the representation the client prefers
    ///
    /// Clients that don't send an `Accept` header get HTML. HTML wins ties.
    /// Returns `None` if neither HTML nor JSON is acceptable.
    #[must_use]
    pub fn negotiate(headers: &HeaderMap) -> Option<Self> {
        let ranges: Vec<Mime> = headers
            .get_all(ACCEPT)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .filter_map(|range| range.trim().parse().ok())
            .collect();

        if ranges.is_empty() {
            return Some(Self::Html);
        }

        let html = quality(&ranges, &mime::TEXT_HTML);
        let json = quality(&ranges, &mime::APPLICATION_JSON);

        if html > 0.0 && html >= json {
            Some(Self::Html)
        } else if json > 0.0 {
            Some(Self::Json)
        } else {
            None
        }
    }
}

impl<S> FromRequestParts<S> for Format
where
    S: Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::negotiate(&parts.headers).ok_or_else(|| {
            tackboard_error!(type = ErrorType::NotAcceptable, "neither HTML nor JSON is acceptable")
        })
    }
}

#[cfg(test)]
mod test {
    use super::Format;
    use http::{header::ACCEPT, HeaderMap, HeaderValue};

    fn negotiate(accept: Option<&'static str>) -> Option<Format> {
        let mut headers = HeaderMap::new();
        if let Some(accept) = accept {
            headers.insert(ACCEPT, HeaderValue::from_static(accept));
        }

        Format::negotiate(&headers)
    }

    #[test]
    fn defaults_to_html() {
        assert_eq!(negotiate(None), Some(Format::Html));
        assert_eq!(negotiate(Some("*/*")), Some(Format::Html));
    }

    #[test]
    fn explicit_types() {
        assert_eq!(negotiate(Some("text/html")), Some(Format::Html));
        assert_eq!(negotiate(Some("application/json")), Some(Format::Json));
        assert_eq!(
            negotiate(Some("text/html,application/xhtml+xml,*/*;q=0.8")),
            Some(Format::Html)
        );
    }

    #[test]
    fn quality_values() {
        assert_eq!(
            negotiate(Some("text/html;q=0.5, application/json")),
            Some(Format::Json)
        );
        assert_eq!(
            negotiate(Some("application/json;q=0.9, text/*")),
            Some(Format::Html)
        );
        assert_eq!(negotiate(Some("text/html;q=0, */*")), Some(Format::Json));
    }

    #[test]
    fn not_acceptable() {
        assert_eq!(negotiate(Some("image/png")), None);
        assert_eq!(negotiate(Some("text/plain, application/xml")), None);
    }
}
