//! Intent strategies for the shopping assistant

use serde::{Deserialize, Serialize};

/// Client-side action attached to an assistant reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// Run a catalog search
    Search { query: String, label: String },
    /// Apply catalog filters
    Filter {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        featured: Option<bool>,
        #[serde(rename = "minPrice", default, skip_serializing_if = "Option::is_none")]
        min_price: Option<f64>,
        #[serde(rename = "maxPrice", default, skip_serializing_if = "Option::is_none")]
        max_price: Option<f64>,
        label: String,
    },
    /// Navigate to a page
    Browse { path: String, label: String },
    /// Ask for the user's location
    Location { label: String },
    /// Show an information topic
    Info { topic: String, label: String },
}

impl Action {
    pub fn search(query: &str, label: &str) -> Self {
        Self::Search {
            query: query.to_string(),
            label: label.to_string(),
        }
    }

    pub fn browse(path: &str, label: &str) -> Self {
        Self::Browse {
            path: path.to_string(),
            label: label.to_string(),
        }
    }

    pub fn category(category: &str, label: &str) -> Self {
        Self::Filter {
            category: Some(category.to_string()),
            featured: None,
            min_price: None,
            max_price: None,
            label: label.to_string(),
        }
    }

    pub fn featured(label: &str) -> Self {
        Self::Filter {
            category: None,
            featured: Some(true),
            min_price: None,
            max_price: None,
            label: label.to_string(),
        }
    }

    pub fn price_range(min: Option<f64>, max: Option<f64>, label: &str) -> Self {
        Self::Filter {
            category: None,
            featured: None,
            min_price: min,
            max_price: max,
            label: label.to_string(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Search { label, .. }
            | Self::Filter { label, .. }
            | Self::Browse { label, .. }
            | Self::Location { label }
            | Self::Info { label, .. } => label,
        }
    }
}

/// Assistant answer with follow-up prompts and actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Reply {
    pub fn new(content: &str, suggestions: &[&str], actions: Vec<Action>) -> Self {
        Self {
            content: content.to_string(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
            actions,
        }
    }
}

/// A strategy that recognises a kind of message and answers it
pub trait Intent: Send + Sync {
    /// Intent identifier
    fn name(&self) -> &str;

    /// Whether this intent handles the message. `message` is lowercased.
    fn matches(&self, message: &str) -> bool;

    /// Build the reply for a matched message
    fn reply(&self, message: &str) -> Reply;
}

/// How a keyword is located in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Anywhere in the message, including inside other words
    Substring(&'static str),
    /// As a whole word only
    Word(&'static str),
}

impl Keyword {
    fn found_in(&self, message: &str) -> bool {
        match self {
            Self::Substring(k) => message.contains(k),
            Self::Word(k) => message
                .split(|c: char| !c.is_alphanumeric())
                .any(|word| word == *k),
        }
    }
}

/// Intent triggered by any of a set of keywords, answering with a fixed reply
pub struct KeywordIntent {
    name: &'static str,
    keywords: Vec<Keyword>,
    reply: Reply,
}

impl KeywordIntent {
    pub fn new(name: &'static str, keywords: Vec<Keyword>, reply: Reply) -> Self {
        Self {
            name,
            keywords,
            reply,
        }
    }
}

impl Intent for KeywordIntent {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, message: &str) -> bool {
        self.keywords.iter().any(|k| k.found_in(message))
    }

    fn reply(&self, _message: &str) -> Reply {
        self.reply.clone()
    }
}

/// Built-in intents in priority order
pub fn builtin() -> Vec<KeywordIntent> {
    use Keyword::{Substring, Word};

    vec![
        KeywordIntent::new(
            "pottery",
            vec![Substring("pottery"), Substring("ceramic")],
            Reply::new(
                "I found some beautiful pottery pieces! Our artisans create handcrafted ceramic bowls, vases, and decorative items. Would you like to see specific types or price ranges?",
                &["Show me ceramic bowls", "What pottery is under $100?", "Find local pottery makers"],
                vec![
                    Action::search("pottery ceramic", "Search Pottery"),
                    Action::category("Pottery", "Browse All Pottery"),
                ],
            ),
        ),
        KeywordIntent::new(
            "woodwork",
            vec![Substring("wood"), Substring("furniture")],
            Reply::new(
                "Wonderful! I have wooden crafts including furniture, sculptures, and decorative items. Our artisans specialize in oak, pine, and exotic woods. What catches your interest?",
                &["Show me wooden furniture", "Find wooden sculptures", "Custom wood pieces"],
                vec![
                    Action::search("wood furniture", "Search Woodwork"),
                    Action::category("Furniture", "Browse Furniture"),
                ],
            ),
        ),
        KeywordIntent::new(
            "trending",
            vec![Substring("trending"), Substring("popular")],
            Reply::new(
                "Currently trending: Eco-friendly bamboo products, hand-woven textiles, and minimalist ceramic designs. Sustainable art is very popular right now!",
                &["Show trending items", "Eco-friendly products", "Minimalist designs"],
                vec![
                    Action::featured("View Trending"),
                    Action::search("eco-friendly sustainable", "Eco Products"),
                ],
            ),
        ),
        KeywordIntent::new(
            "local",
            vec![Substring("local"), Substring("near")],
            Reply::new(
                "I can help you find local artisans! Please share your location, and I'll show you talented creators in your area along with their specialties.",
                &["Find artisans in my area", "Show local pottery makers", "Browse by location"],
                vec![
                    Action::Location {
                        label: "Share Location".to_string(),
                    },
                    Action::browse("/artisans", "Browse Artisans"),
                ],
            ),
        ),
        KeywordIntent::new(
            "budget",
            vec![Substring("price"), Substring("cost"), Substring("expensive")],
            Reply::new(
                "I can help you find items in your budget! Our products range from affordable handmade items under $50 to premium custom pieces. What's your price range?",
                &["Under $50", "$50-$200", "$200-$500", "Premium items"],
                vec![
                    Action::price_range(None, Some(50.0), "Under $50"),
                    Action::price_range(Some(50.0), Some(200.0), "$50-$200"),
                ],
            ),
        ),
        KeywordIntent::new(
            "custom",
            vec![Substring("custom"), Substring("commission")],
            Reply::new(
                "Many of our artisans accept custom orders! I can connect you with creators who specialize in commissioned work. What type of custom piece are you interested in?",
                &["Custom pottery", "Custom furniture", "Custom jewelry", "Contact artisan"],
                vec![
                    Action::search("custom commission", "Custom Work"),
                    Action::browse("/artisans", "Find Artisans"),
                ],
            ),
        ),
        KeywordIntent::new(
            "greeting",
            vec![Substring("hello"), Word("hi"), Substring("help")],
            Reply::new(
                "Hello! I'm here to help you discover amazing artisan products. I can help you search for specific items, find local creators, get recommendations, or answer questions about our artisans and their work. What interests you today?",
                &["Browse pottery", "Find local artisans", "Show trending items", "Help with custom orders"],
                vec![
                    Action::browse("/products", "Browse Products"),
                    Action::browse("/artisans", "Meet Artisans"),
                ],
            ),
        ),
        KeywordIntent::new(
            "shipping",
            vec![Substring("shipping"), Substring("delivery")],
            Reply::new(
                "Shipping varies by artisan and location. Most items ship within 3-7 business days. For custom or made-to-order pieces, delivery times are typically 2-4 weeks. Would you like to know about a specific item?",
                &["Shipping costs", "Delivery times", "International shipping", "Rush orders"],
                vec![Action::Info {
                    topic: "shipping".to_string(),
                    label: "Shipping Info".to_string(),
                }],
            ),
        ),
    ]
}

/// Reply used when no intent matches
pub fn fallback() -> Reply {
    Reply::new(
        "That's interesting! I can help you find artisan products, learn about crafting techniques, or connect you with local creators. What specific items are you looking for?",
        &["Browse all products", "Find artisans", "Search by category", "Get recommendations"],
        vec![
            Action::browse("/products", "Browse Products"),
            Action::search("", "Search Products"),
        ],
    )
}
