//! Minimal HTML pages for the checker.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    address::AddressResolver,
    lookup::{LookupError, ResolvedAllocation},
};

const TITLE: &str = "Dungeon Airdrop Check";

// The snapshot is fixed for the lifetime of the process.
const RESOLVED_CACHE_CONTROL: &str = "public, max-age=3600, stale-while-revalidate=86400";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{TITLE}</title>
</head>
<body>
    <h1>{TITLE}</h1>
{body}
</body>
</html>
"#
    )
}

/// "cosmos, osmo or juno"
fn prefix_list(resolver: &AddressResolver) -> String {
    let prefixes = resolver.accepted_prefixes();
    match prefixes.split_last() {
        None => String::new(),
        Some((last, [])) => escape(last),
        Some((last, rest)) => format!(
            "{} or {}",
            rest.iter()
                .map(|prefix| escape(prefix))
                .collect::<Vec<_>>()
                .join(", "),
            escape(last)
        ),
    }
}

pub fn home(resolver: &AddressResolver) -> Html<String> {
    let body = format!(
        r#"    <form action="/" method="get">
        <input type="text" name="address" placeholder="Enter your address">
        <input type="submit" value="Check">
    </form>
    <hr />
    <p>Use <code>/{{address}}</code> to check the DGN airdrop allocation of an account.</p>
    <p>Addresses starting with {} are accepted, from any wallet.</p>
    <h2>Requirements</h2>
    <ul>
        <li>Minimum: 50 ATOM total staked, to any number of active validators</li>
        <li>Snapshot: CosmosHub block 21383635 (Jul 21st 2024, 07:00:25 UTC)</li>
    </ul>
    <h2>Stake tiers</h2>
    <ul>
        <li>50 - 199 ATOM</li>
        <li>200 - 999 ATOM</li>
        <li>1000+ ATOM</li>
    </ul>"#,
        prefix_list(resolver)
    );

    Html(layout(&body))
}

fn allocation_page(allocation: &ResolvedAllocation) -> String {
    let address = escape(allocation.address().as_str());

    match allocation.display_amount() {
        Some(amount) => layout(&format!(
            r#"    <p>Address: {address}</p>
    <p>Allocation: {amount}</p>"#
        )),
        None => layout(&format!(
            r#"    <p>Address: {address}</p>
    <p>Allocation: No allocation</p>
    <p>This account is not eligible for the airdrop.</p>
    <h2>FAQ</h2>
    <ul>
        <li>Q: Why is my account not eligible?</li>
        <li>A: It had less than 50 ATOM delegated (or redelegating) to active validators on the hub.</li>
    </ul>
    <ul>
        <li>Q: I had 50 ATOM staked?</li>
        <li>A: At CosmosHub block 21383635? Not according to the snapshot export.</li>
    </ul>
    <ul>
        <li>Q: I had no ATOM staked but held NFTs or other multipliers?</li>
        <li>A: 50 ATOM was the minimum, multipliers boost that number. Zero times a multiplier is still zero.</li>
    </ul>"#
        )),
    }
}

pub fn resolved(allocation: &ResolvedAllocation) -> Response {
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static(RESOLVED_CACHE_CONTROL),
        )],
        Html(allocation_page(allocation)),
    )
        .into_response()
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!("    <p>{}</p>", escape(message));
    (status, Html(layout(&body))).into_response()
}

/// Bad input is the caller's problem, anything else is ours.
pub fn lookup_error(error: &LookupError, resolver: &AddressResolver) -> Response {
    match error {
        LookupError::InvalidAddress(kind) => {
            warn!(%kind, "rejected address");
            let body = format!(
                "    <p>Invalid address.</p>\n    <p>Use an address starting with {}.</p>",
                prefix_list(resolver)
            );
            (StatusCode::BAD_REQUEST, Html(layout(&body))).into_response()
        }
        LookupError::EncodingError { .. } => {
            error!(%error, "failed to build canonical address");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error converting to a dungeon address.",
            )
        }
        LookupError::CorruptSnapshotData { .. } => {
            error!(%error, "snapshot data is corrupt");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.")
        }
    }
}
