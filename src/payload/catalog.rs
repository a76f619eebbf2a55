// Fixed probe material: boundary characters, XSS payloads, event handler names

/// Characters whose unescaped appearance in rendered output hints at injection
pub const BOUNDARY_CHARS: [char; 4] = ['<', '>', '"', '\''];

/// Call expression shared by every fixed payload
pub const PAYLOAD_MARKER: &str = "alert(1)";

/// Script tags, attribute breakouts, event-handler payloads
pub const XSS_PAYLOADS: [&str; 6] = [
    "<script>alert(1)</script>",
    "\"><script>alert(1)</script>",
    "<img src=x onerror=alert(1)>",
    "\"><img src=x onerror=alert(1)>",
    "\\ \"-alert(1)}//",
    "\"alert(1)-/><script>///",
];

/// Checked in this order; the first hit wins
pub const EVENT_HANDLERS: [&str; 6] = [
    "onclick",
    "onload",
    "onerror",
    "onchange",
    "onmouseover",
    "onfocus",
];
