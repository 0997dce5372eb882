//! Static catalogs: the document tools users can run and the rewards they
//! can redeem coins for.
//!
//! Both catalogs are read-only lookup tables keyed by slug id.  Coin values
//! are compile-time constants, never user input.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// Functional grouping of a tool, used for catalog presentation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Convert,
    Organize,
    Optimize,
    Security,
    Edit,
}

/// One entry in the tool catalog.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Tool {
    /// Stable slug, e.g. `merge-pdf`.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    /// Coins credited for one completed use.
    pub coins: u64,
}

/// Every tool the application offers.
pub const TOOLS: &[Tool] = &[
    Tool {
        id: "pdf-to-word",
        name: "PDF to Word",
        description: "Easily convert your PDF files into easy to edit DOC and DOCX documents.",
        category: ToolCategory::Convert,
        coins: 6,
    },
    Tool {
        id: "word-to-pdf",
        name: "Word to PDF",
        description: "Make DOC and DOCX files easy to read by converting them to PDF.",
        category: ToolCategory::Convert,
        coins: 6,
    },
    Tool {
        id: "pdf-to-excel",
        name: "PDF to Excel",
        description: "Pull data straight from PDFs into Excel spreadsheets in a few short seconds.",
        category: ToolCategory::Convert,
        coins: 7,
    },
    Tool {
        id: "excel-to-pdf",
        name: "Excel to PDF",
        description: "Make EXCEL spreadsheets easy to read by converting them to PDF.",
        category: ToolCategory::Convert,
        coins: 7,
    },
    Tool {
        id: "pdf-to-powerpoint",
        name: "PDF to PowerPoint",
        description: "Turn your PDF files into easy to edit PPT and PPTX slideshows.",
        category: ToolCategory::Convert,
        coins: 8,
    },
    Tool {
        id: "powerpoint-to-pdf",
        name: "PowerPoint to PDF",
        description: "Make PPT and PPTX slideshows easy to view by converting them to PDF.",
        category: ToolCategory::Convert,
        coins: 8,
    },
    Tool {
        id: "merge-pdf",
        name: "Merge PDF",
        description: "Combine PDFs in the order you want with the easiest PDF merger available.",
        category: ToolCategory::Organize,
        coins: 5,
    },
    Tool {
        id: "split-pdf",
        name: "Split PDF",
        description: "Separate one page or a whole set for easy conversion into independent PDF files.",
        category: ToolCategory::Organize,
        coins: 3,
    },
    Tool {
        id: "compress-pdf",
        name: "Compress PDF",
        description: "Reduce file size while optimizing for maximal PDF quality.",
        category: ToolCategory::Optimize,
        coins: 4,
    },
    Tool {
        id: "rotate-pdf",
        name: "Rotate PDF",
        description: "Rotate your PDFs the way you need them.",
        category: ToolCategory::Organize,
        coins: 2,
    },
    Tool {
        id: "remove-pages",
        name: "Remove Pages",
        description: "Delete specific pages from PDF documents quickly and easily.",
        category: ToolCategory::Organize,
        coins: 3,
    },
    Tool {
        id: "protect-pdf",
        name: "Protect PDF",
        description: "Add password protection to your PDF files to keep them secure.",
        category: ToolCategory::Security,
        coins: 5,
    },
    Tool {
        id: "unlock-pdf",
        name: "Unlock PDF",
        description: "Remove password protection from PDF files when you have the right credentials.",
        category: ToolCategory::Security,
        coins: 5,
    },
    Tool {
        id: "edit-pdf",
        name: "Edit PDF",
        description: "Add text, images, shapes or freehand annotations to a PDF document.",
        category: ToolCategory::Edit,
        coins: 10,
    },
    Tool {
        id: "add-watermark",
        name: "Add Watermark",
        description: "Add text or image watermarks to your PDF documents for branding or security.",
        category: ToolCategory::Edit,
        coins: 6,
    },
    Tool {
        id: "pdf-to-image",
        name: "PDF to Image",
        description: "Convert PDF pages to high-quality images in various formats.",
        category: ToolCategory::Convert,
        coins: 4,
    },
    Tool {
        id: "image-to-pdf",
        name: "Image to PDF",
        description: "Convert images to PDF format while maintaining quality and layout.",
        category: ToolCategory::Convert,
        coins: 4,
    },
    Tool {
        id: "ocr-text",
        name: "OCR Text Recognition",
        description: "Extract text from scanned PDFs and images using advanced OCR technology.",
        category: ToolCategory::Convert,
        coins: 12,
    },
];

/// Look up a tool by its slug.
pub fn tool_by_id(id: &str) -> Option<&'static Tool> {
    TOOLS.iter().find(|t| t.id == id)
}

/// All tools in a given category, catalog order preserved.
pub fn tools_in_category(category: ToolCategory) -> impl Iterator<Item = &'static Tool> {
    TOOLS.iter().filter(move |t| t.category == category)
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

/// One redeemable reward in the wallet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Reward {
    /// Stable slug, e.g. `google-play-50`.
    pub id: &'static str,
    pub name: &'static str,
    /// Face value shown to the user, e.g. `₹50`.
    pub value: &'static str,
    /// Coins debited on redemption.
    pub coins: u64,
    pub description: &'static str,
}

/// Every reward coins can be redeemed for.
pub const REWARDS: &[Reward] = &[
    Reward {
        id: "google-play-50",
        name: "Google Play Gift Card",
        value: "₹50",
        coins: 100,
        description: "Redeem for Google Play Store credit",
    },
    Reward {
        id: "google-play-100",
        name: "Google Play Gift Card",
        value: "₹100",
        coins: 200,
        description: "Redeem for Google Play Store credit",
    },
    Reward {
        id: "google-play-250",
        name: "Google Play Gift Card",
        value: "₹250",
        coins: 500,
        description: "Redeem for Google Play Store credit",
    },
    Reward {
        id: "upi-50",
        name: "UPI Cash",
        value: "₹50",
        coins: 120,
        description: "Direct transfer to your UPI ID",
    },
    Reward {
        id: "upi-100",
        name: "UPI Cash",
        value: "₹100",
        coins: 240,
        description: "Direct transfer to your UPI ID",
    },
    Reward {
        id: "upi-250",
        name: "UPI Cash",
        value: "₹250",
        coins: 600,
        description: "Direct transfer to your UPI ID",
    },
];

/// Look up a reward by its slug.
pub fn reward_by_id(id: &str) -> Option<&'static Reward> {
    REWARDS.iter().find(|r| r.id == id)
}

/// The ledger description recorded when a reward is redeemed.
pub fn redemption_description(reward: &Reward) -> String {
    format!("Redeemed {} ({})", reward.name, reward.value)
}
