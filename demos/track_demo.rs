//! Walk a visitor through three requests: first contact, a return visit,
//! and a Do Not Track request.
//!
//! Run with: cargo run --example track_demo

use http::header::{HeaderValue, COOKIE, SET_COOKIE};
use tracknet::config::TrackingConfig;
use tracknet::filter::{RequestParts, TrackingFilter};

fn main() {
    let mut config = TrackingConfig::new();
    config.enabled = true;
    config.expires = 600;
    let filter = TrackingFilter::new(config);

    // First contact: no cookie yet, one is generated and echoed inbound.
    let mut first = RequestParts::new("203.0.113.5");
    filter.process(&mut first);
    let assigned = first.notes.get("cookie").cloned().unwrap_or_default();
    println!("first visit:");
    println!("  set-cookie: {:?}", first.headers_out.get(SET_COOKIE));
    println!("  assigned:   {assigned}");
    println!("  generated:  {:?}", first.notes.get("cookie_generated"));

    // Return visit: the same value is re-presented.
    let mut second = RequestParts::new("203.0.113.5");
    second.headers_in.insert(
        COOKIE,
        HeaderValue::from_str(&format!("Apache={assigned}")).unwrap(),
    );
    filter.process(&mut second);
    println!("return visit:");
    println!("  set-cookie: {:?}", second.headers_out.get(SET_COOKIE));
    println!("  generated:  {:?}", second.notes.get("cookie_generated"));

    // Do Not Track: the refusal marker replaces the identifier.
    let mut dnt = RequestParts::new("203.0.113.5");
    dnt.headers_in.insert(
        COOKIE,
        HeaderValue::from_str(&format!("Apache={assigned}")).unwrap(),
    );
    dnt.headers_in.insert("dnt", HeaderValue::from_static("1"));
    filter.process(&mut dnt);
    println!("dnt visit:");
    println!("  set-cookie: {:?}", dnt.headers_out.get(SET_COOKIE));
}
