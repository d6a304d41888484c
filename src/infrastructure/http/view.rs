//! Checkout page rendering
//!
//! One template for every page state; the theme only swaps the colour table.

use crate::{
    config::app_config::WidgetConfig,
    domain::{
        checkout::{CheckoutRequest, CheckoutState},
        networks::{network_name, DEFAULT_CHAIN_ID},
        theme::{ColorScheme, Theme},
    },
    infrastructure::http::models::WidgetPayload,
    shared::error::AppResult,
};

const EXAMPLE_QUERY: &str = "?a=merchant.eth&n=Hoodie&color=green&image=/green.webp";

/// Everything a page render needs
pub struct PageContext<'a> {
    pub request: &'a CheckoutRequest,
    pub state: &'a CheckoutState,
    pub widget: &'a WidgetConfig,
    /// Seconds before the resolving view reloads itself
    pub refresh_interval_seconds: u64,
    /// `<host><path>` the page was served from, for the footer referral
    pub page_location: String,
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to embed inside a `<script>` element
pub fn script_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Footer referral link
pub fn footer_href(footer_url: &str, page_location: &str) -> String {
    let reference: String =
        url::form_urlencoded::byte_serialize(format!("footer-{}", page_location).as_bytes()).collect();
    let separator = if footer_url.contains('?') { '&' } else { '?' };
    format!("{}{}ref={}", footer_url, separator, reference)
}

/// Render the checkout page for the given state
pub fn render_page(ctx: &PageContext<'_>) -> AppResult<String> {
    let theme = ctx.request.theme;
    let colors = theme.colors();

    let (title, body, head_extra) = match ctx.state {
        CheckoutState::MissingParameters { .. } => ("MISSING", missing_view(), String::new()),
        CheckoutState::Resolving { name } => (
            "RESOLVING",
            resolving_view(name),
            format!(
                r#"<meta http-equiv="refresh" content="{}">"#,
                ctx.refresh_interval_seconds
            ),
        ),
        CheckoutState::NameResolutionFailed { recipient } => {
            ("FAILED", failed_view(recipient), String::new())
        }
        CheckoutState::UnsupportedNetwork { chain_id } => {
            ("UNSUPPORTED", unsupported_view(*chain_id), String::new())
        }
        CheckoutState::Ready(target) => {
            let payload = WidgetPayload::new(target, ctx.widget);
            ("Smart Checkout", ready_view(ctx, &payload)?, String::new())
        }
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{head_extra}
<style>{style}</style>
</head>
<body class="theme-{theme}">
{body}
</body>
</html>
"#,
        title = escape_html(title),
        head_extra = head_extra,
        style = stylesheet(colors),
        theme = theme.as_str(),
        body = body,
    ))
}

fn stylesheet(colors: &ColorScheme) -> String {
    format!(
        ":root{{--background:{bg};--text:{text};--text-secondary:{secondary};--accent:{accent};\
--button:{button};--button-hover:{button_hover};--button-text:{button_text};--button-text-hover:{button_text_hover}}}\
body{{margin:0;min-height:100vh;background:var(--background);color:var(--text);font-family:system-ui,sans-serif}}\
.page{{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;padding:2rem}}\
.headline{{font-weight:100;text-transform:none;margin:0 0 1rem;font-size:4rem}}\
.panel{{background:var(--accent);border:3px solid var(--text);padding:2rem;color:var(--text-secondary)}}\
.key{{display:inline-block;min-width:2.5rem;margin-right:.75rem;padding:.1rem .4rem;font-weight:800;background:var(--text-secondary);color:var(--background)}}\
.key.required{{background:var(--text)}}\
.product{{position:relative;width:20rem;height:20rem;background:var(--accent);border:4px solid var(--text)}}\
.product img{{width:100%;height:100%;object-fit:cover}}\
.badge{{position:absolute;right:-1rem;bottom:-1rem;padding:.75rem 1.5rem;background:var(--button);color:var(--button-text);border:3px solid var(--background);font-weight:800}}\
.status{{color:var(--text-secondary);font-size:2rem;margin:4rem 0}}\
.purchase{{padding:2rem 4rem;background:var(--button);color:var(--button-text);border:4px solid var(--background);font-weight:800;font-size:1.25rem;letter-spacing:.1em;cursor:pointer}}\
.purchase:hover{{background:var(--button-hover);color:var(--button-text-hover)}}\
.pulse{{width:4rem;height:4rem;background:var(--accent);border:3px solid var(--text);animation:pulse 2s infinite}}\
@keyframes pulse{{50%{{opacity:.4}}}}\
footer a{{color:var(--text-secondary);border:1px solid var(--text-secondary);padding:.4rem .8rem;font-size:.75rem;text-decoration:none;letter-spacing:.1em}}\
footer a:hover{{color:var(--text);border-color:var(--text)}}",
        bg = colors.background,
        text = colors.text,
        secondary = colors.text_secondary,
        accent = colors.accent,
        button = colors.button,
        button_hover = colors.button_hover,
        button_text = colors.button_text,
        button_text_hover = colors.button_text_hover,
    )
}

fn missing_view() -> String {
    let themes = Theme::ALL.map(|t| t.as_str()).join(", ");
    let default_network = network_name(DEFAULT_CHAIN_ID).unwrap_or("celo");
    format!(
        r#"<main class="page view-missing">
<h1 class="headline">MISSING</h1>
<h2 class="headline">parameters</h2>
<div class="panel">
<p>REQUIRED URL PARAMETERS:</p>
<ul>
<li><span class="key required">A</span>recipient (address or ENS)</li>
<li><span class="key required">N</span>product name</li>
<li><span class="key">C</span>optional chain ID (defaults to {network})</li>
<li><span class="key">M</span>theme ({themes})</li>
<li><span class="key">IMG</span>optional product image URL</li>
</ul>
<p>EXAMPLE: {example}</p>
</div>
</main>"#,
        network = capitalize(default_network),
        themes = themes,
        example = escape_html(EXAMPLE_QUERY),
    )
}

fn resolving_view(name: &str) -> String {
    format!(
        r#"<main class="page view-resolving">
<h1 class="headline">RESOLVING</h1>
<p>{name}</p>
<div class="pulse"></div>
</main>"#,
        name = escape_html(name),
    )
}

fn failed_view(recipient: &str) -> String {
    format!(
        r#"<main class="page view-failed">
<h1 class="headline">FAILED</h1>
<div class="panel">
<p>COULD NOT RESOLVE ENS NAME:</p>
<p><strong>{recipient}</strong></p>
</div>
</main>"#,
        recipient = escape_html(recipient),
    )
}

fn unsupported_view(chain_id: u64) -> String {
    format!(
        r#"<main class="page view-unsupported">
<h1 class="headline">UNSUPPORTED</h1>
<div class="panel">
<p>NO USDC PAYMENTS ON CHAIN:</p>
<p><strong>{chain_id}</strong></p>
</div>
</main>"#,
        chain_id = chain_id,
    )
}

fn ready_view(ctx: &PageContext<'_>, payload: &WidgetPayload) -> AppResult<String> {
    let product = ctx.request.product.as_deref().unwrap_or("Product");
    let image = ctx.request.image_source();
    let widget_script = match &ctx.widget.script_url {
        Some(src) => format!(r#"<script src="{}" defer></script>"#, escape_html(src)),
        None => String::new(),
    };

    Ok(format!(
        r#"<main class="page view-ready">
<h1 class="headline">SMART</h1>
<h2 class="headline">checkout</h2>
<div class="product">
<img src="{image}" alt="{product}" width="320" height="320">
<span class="badge">{product}</span>
</div>
<p class="status">PURCHASE READY</p>
<button id="purchase" class="purchase" type="button">PURCHASE NOW</button>
</main>
<footer class="page"><a href="{footer}" target="_blank" rel="noopener">POWERED BY DAIMO PAY</a></footer>
<script type="application/json" id="checkout-widget">{payload}</script>
{widget_script}
<script>{hand_off}</script>"#,
        image = escape_html(image.src()),
        product = escape_html(product),
        footer = escape_html(&footer_href(&ctx.widget.footer_url, &ctx.page_location)),
        payload = script_json(payload)?,
        widget_script = widget_script,
        hand_off = HAND_OFF_SCRIPT,
    ))
}

/// Opens the widget and reports its lifecycle callbacks back to the server
const HAND_OFF_SCRIPT: &str = r#"(function(){
var config=JSON.parse(document.getElementById("checkout-widget").textContent);
function report(event,payment){
fetch("/api/payments/events",{method:"POST",headers:{"Content-Type":"application/json"},body:JSON.stringify({event:event,payment:payment})}).catch(function(){});
}
document.getElementById("purchase").addEventListener("click",function(){
if(!window.SmartCheckoutWidget){console.warn("payment widget not loaded");return;}
window.SmartCheckoutWidget.show(config,{
onPaymentStarted:function(p){report("started",p);},
onPaymentCompleted:function(p){report("completed",p);}
});
});
})();"#;

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
