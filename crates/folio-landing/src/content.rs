#![forbid(unsafe_code)]

//! Static page copy.
//!
//! Everything the page says lives here as plain data. The showcase turns
//! [`TECH_TABS`] into a validated registry at start-up; the other sections
//! read their tables directly.

use serde::Serialize;

/// Colour family of a panel's gradient accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccentToken {
    Primary,
    Blue,
    Purple,
    Green,
    Orange,
    Yellow,
}

/// Copy for one showcase tab.
#[derive(Debug, Clone, Copy)]
pub struct TabCopy {
    pub id: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Opaque image reference; `None` renders a placeholder.
    pub image: Option<&'static str>,
    pub features: &'static [&'static str],
    pub accent: AccentToken,
}

pub const TECH_TABS: &[TabCopy] = &[
    TabCopy {
        id: "book-setup",
        label: "Book Setup",
        title: "Start your project right",
        description: "Set up your book project with all the essential elements, from genre and target audience to themes and writing style.",
        image: Some("assets/book-setup.png"),
        features: &[
            "Genre selection and analysis",
            "Target audience definition",
            "Theme exploration",
            "Writing style customization",
            "Book length optimization",
        ],
        accent: AccentToken::Primary,
    },
    TabCopy {
        id: "story-structure",
        label: "Story Structure",
        title: "Build perfect story arcs",
        description: "Our AI analyzes successful book structures to generate compelling story arcs that keep readers engaged from start to finish.",
        image: Some("assets/story-structure.png"),
        features: &[
            "Genre-specific story templates",
            "Plot point generation",
            "Rising and falling action balance",
            "Conflict and resolution mapping",
            "Story beat analysis",
        ],
        accent: AccentToken::Blue,
    },
    TabCopy {
        id: "character-development",
        label: "Character Development",
        title: "Create memorable characters",
        description: "Develop multi-dimensional characters with rich backstories, clear motivations, and authentic dialogue that resonates with readers.",
        image: Some("assets/character-analysis.png"),
        features: &[
            "Character archetype templates",
            "Personality trait analysis",
            "Character relationship mapping",
            "Dialogue style customization",
            "Character arc development",
        ],
        accent: AccentToken::Purple,
    },
    TabCopy {
        id: "chapter-analysis",
        label: "Chapter Analysis",
        title: "Perfect your chapter structure",
        description: "Analyze and optimize individual chapters for pacing, engagement, and narrative flow to keep readers turning pages.",
        image: Some("assets/chapter-analysis.png"),
        features: &[
            "Chapter pacing analysis",
            "Scene structure optimization",
            "Tension and release balance",
            "Chapter hook suggestions",
            "Transition effectiveness scoring",
        ],
        accent: AccentToken::Green,
    },
    TabCopy {
        id: "cover-design",
        label: "Cover Design",
        title: "Eye-catching cover designs",
        description: "Generate professional book covers that stand out in the marketplace and attract your target readers.",
        image: Some("assets/cover-design.png"),
        features: &[
            "Genre-appropriate visuals",
            "Typography optimization",
            "Color palette selection",
            "Market-tested designs",
            "Custom element integration",
        ],
        accent: AccentToken::Orange,
    },
    TabCopy {
        id: "document-preview",
        label: "Document Preview",
        title: "Preview your finished book",
        description: "See how your finished book will look with our interactive document preview feature, allowing you to experience your book as readers will.",
        image: Some("assets/document-preview.png"),
        features: &[
            "Interactive page turning",
            "Multiple format previews (PDF, ePub, Print)",
            "Font and layout visualization",
            "Mobile and desktop reading views",
            "Export-ready formatting check",
        ],
        accent: AccentToken::Yellow,
    },
];

pub const SHOWCASE_BADGE: &str = "Advanced Technology";
pub const SHOWCASE_HEADING: &str = "AI-Powered Technology For Book Creation";
pub const SHOWCASE_SUBHEADING: &str =
    "Discover how our platform transforms the writing process with state-of-the-art AI";
pub const SHOWCASE_CTA: &str = "Get Started Today →";
pub const SHOWCASE_DECOR_BADGE: &str = "AI-Powered";

pub const BRAND: &str = "AI Book Generator";
pub const NAV_LINKS: &[&str] = &["Features", "Technology", "Journey", "FAQ"];

pub const HERO_BADGE: &str = "Revolutionary AI Book Creation";
pub const HERO_HEADLINE: &str = "Your Million-Dollar Bestseller Is Now Within Reach";
pub const HERO_BODY: &str = "What if you could create a professional, publish-ready book in less time than it takes to watch a movie? Our revolutionary macOS application harnesses bleeding-edge artificial intelligence that top publishers are desperately trying to keep secret.";
pub const HERO_PRIMARY_CTA: &str = "Get Started Now →";
pub const HERO_SECONDARY_CTA: &str = "See How It Works";
pub const HERO_FLOATS: [(&str, &str); 2] = [("100%", "Ready to Publish"), ("24h", "From Zero to Author")];
pub const HERO_SCROLL_HINT: &str = "Scroll to explore";

/// One card in the feature grid.
#[derive(Debug, Clone, Copy)]
pub struct FeatureCopy {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES_HEADING: &str = "Revolutionary Tools For Modern Authors";
pub const FEATURES: &[FeatureCopy] = &[
    FeatureCopy {
        title: "Plot Generation",
        description: "Create compelling narratives with AI-driven plot structures tailored to your genre and target audience.",
    },
    FeatureCopy {
        title: "Character Development",
        description: "Craft multidimensional characters with rich backstories, motivations, and authentic dialogue.",
    },
    FeatureCopy {
        title: "Bestseller Formulas",
        description: "Leverage data-driven insights from thousands of bestsellers to optimize your story's market appeal.",
    },
    FeatureCopy {
        title: "Chapter Structure",
        description: "Optimize your narrative flow with intelligent chapter analysis that enhances pacing and reader engagement.",
    },
    FeatureCopy {
        title: "AI-Powered Editing",
        description: "Polish your manuscript with advanced AI suggestions for grammar, style, and narrative cohesion.",
    },
    FeatureCopy {
        title: "Cover Design",
        description: "Generate eye-catching book covers tailored to your genre and story elements that capture readers' attention.",
    },
];

/// One stage on the creation journey timeline.
#[derive(Debug, Clone, Copy)]
pub struct StageCopy {
    pub title: &'static str,
    pub description: &'static str,
    pub accent: AccentToken,
}

pub const JOURNEY_HEADING: &str = "Creation Journey";
pub const JOURNEY_SUBHEADING: &str = "Follow the path from first idea to published book";
pub const JOURNEY_STAGES: &[StageCopy] = &[
    StageCopy {
        title: "Ideation",
        description: "Transform your initial concept into a structured book outline with AI assistance",
        accent: AccentToken::Blue,
    },
    StageCopy {
        title: "Creation",
        description: "Draft your manuscript with AI-powered writing tools that enhance your creativity",
        accent: AccentToken::Purple,
    },
    StageCopy {
        title: "Refinement",
        description: "Polish your content with advanced AI editing and enhancement features",
        accent: AccentToken::Green,
    },
    StageCopy {
        title: "Publication",
        description: "Prepare your book for publishing with AI-optimized formatting and design",
        accent: AccentToken::Orange,
    },
    StageCopy {
        title: "Marketing",
        description: "Promote your book with AI-generated marketing materials and optimization",
        accent: AccentToken::Yellow,
    },
];

pub const GET_STARTED_HEADING: &str = "Start Your Writing Journey Today";
pub const GET_STARTED_SUBHEADING: &str =
    "Join thousands of authors who have transformed their creative process with AI Book Generator";
pub const GET_STARTED_OFFER_TITLE: &str = "Experience the Full Power of AI Book Generator";
pub const GET_STARTED_CHECKLIST: &[&str] = &[
    "Access to all writing and editing tools",
    "Unlimited book projects",
    "Advanced character development",
    "Plot structure assistance",
    "Genre-specific templates",
    "Cover design generation",
    "Personalized writing insights",
    "Community access and feedback",
];
pub const GET_STARTED_OFFER_FOOTER: [&str; 2] =
    ["Get unlimited access today", "Start creating immediately"];
pub const GET_STARTED_PITCH_TITLE: &str = "Ready to Write Your Bestseller?";
pub const GET_STARTED_PITCH: &str =
    "Join our community of successful authors and start creating your book today.";
pub const GET_STARTED_QUOTE_HEADING: &str = "What our users are saying:";
pub const GET_STARTED_QUOTE: &str = "\"I finished my first draft in just 3 weeks using AI Book Generator. The platform made the writing process enjoyable and efficient!\"";
pub const GET_STARTED_QUOTE_AUTHOR: &str = "- Amanda K., Published Author";
pub const GET_STARTED_CTA: &str = "Get Started Now →";
pub const GET_STARTED_FOOTNOTE: &str = "Join thousands of authors transforming their writing process";

/// One FAQ entry.
#[derive(Debug, Clone, Copy)]
pub struct FaqCopy {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ_HEADING: &str = "Frequently Asked Questions";
pub const FAQ: &[FaqCopy] = &[
    FaqCopy {
        question: "How does AI Book Generator work?",
        answer: "AI Book Generator uses advanced natural language processing models to help you plan, write, and edit your book. You start by defining your book's genre, target audience, and basic premise. The AI then assists with character development, plot structure, chapter organization, and narrative cohesion. You maintain full creative control while the AI provides suggestions, alternatives, and improvements.",
    },
    FaqCopy {
        question: "Will my book be unique or will it sound AI-generated?",
        answer: "Your book will be completely unique and reflect your voice as an author. Our AI tools are designed to enhance your creativity, not replace it. The platform provides suggestions based on successful writing patterns, but you make all final decisions about content. Many bestselling authors use our platform, and readers never realize their books were created with AI assistance.",
    },
    FaqCopy {
        question: "Do I need writing experience to use AI Book Generator?",
        answer: "Not at all! Our platform is designed for writers of all experience levels. Beginners receive more guidance with fundamentals like story structure and character development, while experienced authors can use the AI to overcome writer's block, refine their prose, or experiment with new narrative techniques. The platform adapts to your skill level.",
    },
    FaqCopy {
        question: "Can I publish and sell books created with AI Book Generator?",
        answer: "Absolutely! You retain 100% ownership and copyright of all content created with our platform. You can publish your book through traditional publishers, self-publishing platforms like Amazon KDP, or any other publishing channel of your choice. Many of our users have created commercially successful books.",
    },
    FaqCopy {
        question: "What genres does AI Book Generator support?",
        answer: "Our platform supports all major fiction and non-fiction genres, including but not limited to: Romance, Science Fiction, Fantasy, Mystery, Thriller, Horror, Historical Fiction, Literary Fiction, Self-Help, Business, Memoir, and more. The AI is trained on successful books across all these categories and can adapt to specific subgenres as well.",
    },
    FaqCopy {
        question: "How long does it take to complete a book?",
        answer: "The timeframe varies depending on your book's length and complexity, as well as how much time you can dedicate to writing. That said, many authors report completing first drafts 2-3x faster with AI Book Generator than they could without it. The platform helps you maintain momentum by eliminating writer's block and providing immediate feedback and suggestions.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tab_ids_are_unique() {
        let ids: HashSet<_> = TECH_TABS.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), TECH_TABS.len());
    }

    #[test]
    fn every_tab_lists_five_features() {
        assert!(TECH_TABS.iter().all(|t| t.features.len() == 5));
    }

    #[test]
    fn section_tables_sizes() {
        assert_eq!(FEATURES.len(), 6);
        assert_eq!(JOURNEY_STAGES.len(), 5);
        assert_eq!(FAQ.len(), 6);
        assert_eq!(GET_STARTED_CHECKLIST.len(), 8);
    }
}
