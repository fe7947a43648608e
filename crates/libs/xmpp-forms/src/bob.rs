//! XEP-0231 bits of binary: inline blobs addressed by `cid:` URIs.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use xmpp_wire::{Element, StreamError, Unmarshal};

pub const NS_BOB: &str = "urn:xmpp:bob";

const CID_SCHEME: &str = "cid:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BobData {
    pub cid: String,
    pub mime_type: String,
    /// Seconds the receiver may cache the data; `None` when unspecified.
    pub max_age: Option<u64>,
    pub base64: String,
}

impl BobData {
    pub fn new(cid: impl Into<String>, base64: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            base64: base64.into(),
            ..Self::default()
        }
    }

    /// Decode the payload. Line breaks and other whitespace are ignored.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let compact: String = self.base64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        BASE64_STANDARD.decode(compact)
    }
}

impl Unmarshal for BobData {
    fn unmarshal(&mut self, element: &Element) -> Result<(), StreamError> {
        self.cid = element.attr_or_default("cid");
        self.mime_type = element.attr_or_default("type");
        self.max_age = element
            .attr("max-age")
            .map(|age| {
                age.trim().parse().map_err(|_| {
                    StreamError::malformed(&element.name, format!("invalid max-age {age:?}"))
                })
            })
            .transpose()?;
        self.base64 = element.text.clone();
        Ok(())
    }
}

/// The content-id a `cid:` URI points at, `None` for any other scheme.
pub fn content_id(uri: &str) -> Option<&str> {
    uri.strip_prefix(CID_SCHEME)
}

/// Decoded bytes of the blob `uri` refers to.
///
/// Non-`cid:` URIs, unknown content-ids and undecodable payloads all
/// resolve to `None`.
pub fn resolve<'a>(uri: &str, blobs: impl IntoIterator<Item = &'a BobData>) -> Option<Vec<u8>> {
    let cid = content_id(uri)?;
    let Some(blob) = blobs.into_iter().find(|blob| blob.cid == cid) else {
        log::debug!("forms: no inline data for {uri}");
        return None;
    };
    match blob.decode() {
        Ok(data) => Some(data),
        Err(err) => {
            log::debug!("forms: inline data for {uri} is not valid base64: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmpp_wire::QName;

    #[test]
    fn resolves_only_known_cid_uris() {
        let blobs = [BobData::new("foobax", "....."), BobData::new("foobar", "aGVsbG8=")];

        assert_eq!(resolve("cid:foobar", &blobs), Some(b"hello".to_vec()));
        assert_eq!(resolve("cid:foobax", &blobs), None);
        assert_eq!(resolve("cid:missing", &blobs), None);
        assert_eq!(resolve("hello:world", &blobs), None);
        assert_eq!(resolve("", &blobs), None);
    }

    #[test]
    fn decode_ignores_line_breaks() {
        let blob = BobData::new("x", "aGVs\nbG8=\n");
        assert_eq!(blob.decode().expect("decode"), b"hello");
    }

    #[test]
    fn unmarshals_data_element() {
        let element = Element::new(QName::new(NS_BOB, "data"))
            .with_attr("cid", "sha1+8f35fef110ffc5df08d579a50083ff9308fb6242@bob.xmpp.org")
            .with_attr("type", "image/png")
            .with_attr("max-age", "86400")
            .with_text("iVBORw0KGgo=");

        let mut blob = BobData::default();
        blob.unmarshal(&element).expect("unmarshal");
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.max_age, Some(86400));
        assert_eq!(blob.base64, "iVBORw0KGgo=");

        let bad = Element::new(QName::new(NS_BOB, "data")).with_attr("max-age", "forever");
        let mut blob = BobData::default();
        assert!(matches!(blob.unmarshal(&bad), Err(StreamError::Malformed { .. })));
    }
}
