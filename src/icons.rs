//! Icon lookup for generated collections.
//!
//! Collections get an icon picked from a fixed vocabulary of Material icon
//! names. Common collection names hit an override table; everything else is
//! matched to the vocabulary entry with the smallest Levenshtein distance,
//! with ties going to the entry that appears first.

use strsim::levenshtein;

/// Exact labels that would otherwise resolve to an unhelpful neighbour.
const OVERRIDES: &[(&str, &str)] = &[
    ("authors", "people"),
    ("content", "wysiwyg"),
    ("data", "data_usage"),
    ("docs", "description"),
    ("events", "event"),
    ("news", "newspaper"),
    ("pages", "wysiwyg"),
    ("posts", "event_available"),
    ("products", "shopping_cart"),
    ("projects", "work"),
    ("source", "wysiwyg"),
    ("staff", "badge"),
    ("team", "groups"),
];

/// Icon vocabulary, sorted.
pub const ICONS: &[&str] = &[
    "account_box", "account_circle", "add_location", "add_shopping_cart", "alarm", "album",
    "analytics", "anchor", "announcement", "apartment", "api", "apps", "architecture",
    "archive", "article", "assessment", "assignment", "attach_money", "attractions",
    "audiotrack", "auto_stories", "badge", "bakery_dining", "beach_access", "bedtime", "bolt",
    "book", "bookmark", "bookmarks", "brush", "bug_report", "build", "business",
    "business_center", "cabin", "cake", "calendar_month", "calendar_today", "call", "camera",
    "campaign", "card_giftcard", "casino", "category", "celebration", "chat", "chat_bubble",
    "checklist", "child_care", "church", "cloud", "code", "collections", "collections_bookmark",
    "color_lens", "comment", "computer", "construction", "contact_mail", "contact_page",
    "contact_phone", "contacts", "content_copy", "content_paste", "cookie", "copyright",
    "credit_card", "dashboard", "data_alert", "data_array", "data_object", "data_usage",
    "dataset", "date_range", "delete", "description", "design_services", "developer_board",
    "devices", "dialogs", "directions_car", "directions_run", "discount", "dns", "domain",
    "download", "draft", "drafts", "edit", "edit_calendar", "edit_note", "electric_bolt",
    "email", "emoji_events", "emoji_people", "engineering", "event", "event_available",
    "event_note", "explore", "extension", "face", "factory", "favorite", "feed", "fingerprint",
    "fitness_center", "flag", "flight", "folder", "folder_open", "forest", "forum",
    "gallery_thumbnail", "gavel", "group", "groups", "handshake", "headphones",
    "health_and_safety", "help", "history", "home", "hotel", "house", "hub", "image",
    "import_contacts", "inbox", "info", "insights", "interests", "inventory", "key", "label",
    "landscape", "language", "layers", "library_books", "lightbulb", "link", "list",
    "local_cafe", "local_dining", "local_offer", "location_city", "location_on", "lock",
    "loyalty", "mail", "map", "menu_book", "mic", "military_tech", "monetization_on", "mood",
    "movie", "museum", "music_note", "navigation", "newspaper", "note", "notes",
    "notifications", "palette", "park", "people", "person", "pets", "phone", "photo",
    "photo_library", "picture_as_pdf", "pin_drop", "place", "podcasts", "policy", "post_add",
    "precision_manufacturing", "price_change", "print", "psychology", "public",
    "question_answer", "quiz", "rate_review", "receipt", "recommend", "redeem", "restaurant",
    "reviews", "rocket_launch", "rss_feed", "savings", "school", "science", "search", "sell",
    "settings", "share", "shopping_bag", "shopping_cart", "sports", "star", "store",
    "storefront", "subscriptions", "summarize", "support", "tag", "task", "terminal",
    "theaters", "thumb_up", "timeline", "today", "topic", "tour", "translate", "travel_explore",
    "trending_up", "tune", "verified", "video_library", "videocam", "view_list",
    "volunteer_activism", "wallet", "web", "widgets", "work", "workspaces", "wysiwyg",
];

/// Finds the icon closest to `label`.
pub fn find_icon(label: &str) -> &'static str {
    if let Some((_, icon)) = OVERRIDES.iter().find(|(name, _)| *name == label) {
        return icon;
    }

    let mut best = ICONS[0];
    let mut best_distance = levenshtein(label, best);
    for icon in &ICONS[1..] {
        let distance = levenshtein(label, icon);
        if distance < best_distance {
            best = icon;
            best_distance = distance;
        }
    }
    best
}
