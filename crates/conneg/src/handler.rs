use crate::body::ResponseBody;
use crate::capability::CapabilitySet;
use crate::encoding::encoder::compress_response;
use crate::preference::AcceptEncoding;
use crate::request::RequestContext;
use crate::token::EncodingToken;
use async_trait::async_trait;
use http::{Response, StatusCode};
use tracing::warn;

#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke(&self, req: &RequestContext<'_>) -> Response<ResponseBody>;
}

/// A handler that negotiates the response encoding before delegating.
///
/// Each request is parsed, sorted and selected against the capability set
/// declared at construction. A gzip selection wraps the delegate's body in
/// the gzip transform; identity delegates untouched; a failed negotiation
/// answers 406 without invoking the delegate at all.
pub struct EncodingHandler<H> {
    handler: H,
    capabilities: CapabilitySet,
}

impl<H> EncodingHandler<H> {
    pub fn new(handler: H, capabilities: CapabilitySet) -> Self {
        Self { handler, capabilities }
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for EncodingHandler<H> {
    async fn invoke(&self, req: &RequestContext<'_>) -> Response<ResponseBody> {
        let accept = AcceptEncoding::from_headers(req.headers());
        match accept.select(&self.capabilities) {
            Some(EncodingToken::Gzip) => {
                let mut resp = self.handler.invoke(req).await;
                compress_response(&mut resp);
                resp
            }
            Some(EncodingToken::Identity) => self.handler.invoke(req).await,
            Some(other) => {
                // fail closed: the capability set advertises an encoding this
                // layer has no transform for
                warn!("selected encoding {other} has no transform, answering not acceptable");
                not_acceptable()
            }
            None => not_acceptable(),
        }
    }
}

fn not_acceptable() -> Response<ResponseBody> {
    let mut resp = Response::new(ResponseBody::empty());
    *resp.status_mut() = StatusCode::NOT_ACCEPTABLE;
    resp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrapper::{EncodingWrapper, Wrapper};
    use http::Request;
    use http::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
    use http_body_util::BodyExt;
    use std::io::Read;
    use std::sync::atomic::{AtomicBool, Ordering};

    const PAYLOAD: &str = "the quick brown fox jumps over the lazy dog";

    struct FixedHandler;

    #[async_trait]
    impl RequestHandler for FixedHandler {
        async fn invoke(&self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
            Response::new(ResponseBody::from(PAYLOAD))
        }
    }

    struct ProbeHandler {
        invoked: AtomicBool,
    }

    #[async_trait]
    impl RequestHandler for ProbeHandler {
        async fn invoke(&self, _req: &RequestContext<'_>) -> Response<ResponseBody> {
            self.invoked.store(true, Ordering::SeqCst);
            Response::new(ResponseBody::from(PAYLOAD))
        }
    }

    fn request(accept_encoding: Option<&str>) -> Request<()> {
        let builder = Request::builder().uri("/resource");
        match accept_encoding {
            Some(value) => builder.header(ACCEPT_ENCODING, value).body(()).unwrap(),
            None => builder.body(()).unwrap(),
        }
    }

    fn gunzip(compressed: &[u8]) -> String {
        let mut decoder = flate2::read::GzDecoder::new(compressed);
        let mut out = String::new();
        decoder.read_to_string(&mut out).unwrap();
        out
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn gzip_round_trip() {
        let handler = EncodingWrapper::new(["gzip", "exi"]).unwrap().wrap(FixedHandler);

        let req = request(Some("gzip"));
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_ENCODING).unwrap(), "gzip");

        let compressed = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(gunzip(&compressed), PAYLOAD);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn absent_header_takes_identity_path() {
        let handler = EncodingWrapper::new(["gzip", "identity"]).unwrap().wrap(FixedHandler);

        let req = request(None);
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(CONTENT_ENCODING).is_none());

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, PAYLOAD.as_bytes());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn header_tokens_are_case_insensitive() {
        let handler = EncodingWrapper::new(["gzip", "identity"]).unwrap().wrap(FixedHandler);

        let req = request(Some("GZip"));
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.headers().get(CONTENT_ENCODING).unwrap(), "gzip");
        let compressed = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(gunzip(&compressed), PAYLOAD);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn failed_negotiation_answers_406_without_delegating() {
        let probe = ProbeHandler { invoked: AtomicBool::new(false) };
        let wrapper = EncodingWrapper::new(["gzip"]).unwrap();
        let handler = wrapper.wrap(probe);

        let req = request(Some("compress"));
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
        assert!(resp.body().is_empty());
        assert!(!handler.handler.invoked.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn selected_encoding_without_transform_fails_closed() {
        // exi is advertised and the client asks for it, but there is no exi
        // transform, so the request is refused rather than mislabeled
        let probe = ProbeHandler { invoked: AtomicBool::new(false) };
        let handler = EncodingWrapper::new(["gzip", "exi"]).unwrap().wrap(probe);

        let req = request(Some("EXI"));
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE);
        assert!(!handler.handler.invoked.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn disabled_identity_falls_back_to_gzip() {
        let handler = EncodingWrapper::new(["gzip", "identity"]).unwrap().wrap(FixedHandler);

        let req = request(Some("gzip;q=0.5,*;q=1,compress;q=0.8,identity;q=0"));
        let resp = handler.invoke(&RequestContext::from(&req)).await;

        assert_eq!(resp.headers().get(CONTENT_ENCODING).unwrap(), "gzip");
        let compressed = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(gunzip(&compressed), PAYLOAD);
    }
}
