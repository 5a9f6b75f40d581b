use async_trait::async_trait;
use conneg::{EncodingWrapper, RequestContext, RequestHandler, ResponseBody, Wrapper};
use http::Request;
use http::header::{ACCEPT_ENCODING, CONTENT_ENCODING};
use http_body_util::BodyExt;

struct HelloHandler;

#[async_trait]
impl RequestHandler for HelloHandler {
    async fn invoke(&self, _req: &RequestContext<'_>) -> http::Response<ResponseBody> {
        http::Response::new(ResponseBody::from("hello world, many times over, hello world"))
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let wrapper = EncodingWrapper::new(["gzip", "identity"]).expect("capability list is valid");
    let handler = wrapper.wrap(HelloHandler);

    for accept in [Some("gzip"), Some("identity"), None, Some("br")] {
        let mut builder = Request::builder().uri("/hello");
        if let Some(value) = accept {
            builder = builder.header(ACCEPT_ENCODING, value);
        }
        let req = builder.body(()).unwrap();

        let resp = handler.invoke(&RequestContext::from(&req)).await;
        let encoding =
            resp.headers().get(CONTENT_ENCODING).map(|v| v.to_str().unwrap_or("?").to_owned());
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();

        println!(
            "accept-encoding: {:>8} => status {}, content-encoding {:?}, {} body bytes",
            accept.unwrap_or("(absent)"),
            status,
            encoding,
            body.len()
        );
    }
}
