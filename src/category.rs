use log::debug;

/// Label used when no category is known
pub const GENERAL_LABEL: &str = "GENEL";

/// Category used when nothing more specific is known
pub const DEFAULT_CATEGORY: &str = "borçlar_hukuku";

/// Known case categories and their display names
pub const KNOWN_CATEGORIES: &[(&str, &str)] = &[
    ("borçlar_hukuku", "BORÇLAR HUKUKU"),
    ("aile_hukuku", "AİLE HUKUKU"),
    ("iş_hukuku", "İŞ HUKUKU"),
    ("ceza_hukuku", "CEZA HUKUKU"),
    ("ticaret_hukuku", "TİCARET HUKUKU"),
    ("idare_hukuku", "İDARE HUKUKU"),
    ("tüketici_hukuku", "TÜKETİCİ HUKUKU"),
];

/// Default category for each document template
const TEMPLATE_CATEGORIES: &[(&str, &str)] = &[
    ("dava_dilekce", "borçlar_hukuku"),
    ("ihtarname", "borçlar_hukuku"),
    ("uzlaşma_teklifi", "borçlar_hukuku"),
    ("bilirkisi_itiraz", "borçlar_hukuku"),
    ("itiraz_dilekce", "borçlar_hukuku"),
    ("aile_hukuku_dilekce", "aile_hukuku"),
    ("boşanma_davası", "aile_hukuku"),
    ("nafaka_davası", "aile_hukuku"),
    ("velayet_davası", "aile_hukuku"),
    ("is_hukuku_dilekce", "iş_hukuku"),
    ("iş_davası", "iş_hukuku"),
    ("işe_iade", "iş_hukuku"),
    ("ticaret_hukuku_dilekce", "ticaret_hukuku"),
    ("ceza_davası", "ceza_hukuku"),
    ("temyiz_dilekce", "ceza_hukuku"),
];

const FAMILY_KEYWORDS: &[&str] = &[
    "boşan", "eş", "evli", "nafaka", "velayet", "çocuk", "aile", "evlilik", "nikah", "şiddet",
    "mal paylaşımı", "mehir", "ayrılık", "akrabalık", "ev içi şiddet", "aile içi şiddet",
    "domestic violence", "fiziksel şiddet", "psikolojik şiddet", "eşim", "karım", "kocam",
    "çocuklarım", "babalık", "annelik", "tanıma", "nişan", "soy bağı", "evlilik birliği",
    "boşanma davası", "anlaşmalı boşanma", "çekişmeli boşanma",
];

const LABOR_KEYWORDS: &[&str] = &[
    "işçi", "işveren", "maaş", "tazminat", "iş sözleşmesi", "ücret", "mesai", "mobbing", "sigorta",
    "işten çıkarma", "ihbar", "kıdem", "işyeri", "işe iade", "fazla çalışma", "mesai ücreti", "sgk",
    "sigortasız çalışma", "iş kazası", "meslek hastalığı", "sendika", "grev", "lokavt",
];

const CRIMINAL_KEYWORDS: &[&str] = &[
    "suç", "ceza", "hapis", "hırsızlık", "dolandırıcılık", "cinsel", "yaralama", "kasten",
    "taksirle", "kaçakçılık", "uyuşturucu", "silah", "tutuklu", "mahkum", "sabıka", "cezaevi",
    "mağdur", "sanık", "şüpheli", "delil", "beraat", "darp", "tehdit", "hakaret", "savcı", "ifade",
    "sorgulama",
];

const CONSUMER_KEYWORDS: &[&str] = &[
    "tüketici", "ayıplı mal", "iade", "değişim", "garanti", "satış", "alışveriş", "sipariş", "ürün",
    "hizmet", "abonelik", "fatura", "cayma hakkı", "mesafeli satış",
];

const DOMESTIC_VIOLENCE_KEYWORDS: &[&str] = &[
    "şiddet", "darp", "dövmek", "tehdit", "hakaret", "ev içi şiddet", "aile içi şiddet",
    "fiziksel şiddet", "psikolojik şiddet", "silah", "bıçak", "yaralamak", "döv",
];

/// Display label for a category code.
///
/// Known codes use the fixed table, anything else is uppercased.
pub fn display_name(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return GENERAL_LABEL.to_string();
    }
    KNOWN_CATEGORIES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

/// Default category for a template, if the template is known
pub fn template_default(template_name: &str) -> Option<&'static str> {
    TEMPLATE_CATEGORIES
        .iter()
        .find(|(template, _)| *template == template_name)
        .map(|(_, category)| *category)
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Suggest a category from the template and the case description.
///
/// Keyword groups are checked in order family, labor, criminal, consumer;
/// the first matching group wins. Violence indicators together with family
/// keywords always mean family law.
pub fn suggest(template_name: &str, description: &str) -> String {
    let mut category = template_default(template_name).unwrap_or(DEFAULT_CATEGORY);
    let text = description.to_lowercase();
    let family = mentions_any(&text, FAMILY_KEYWORDS);

    if family {
        category = "aile_hukuku";
    } else if mentions_any(&text, LABOR_KEYWORDS) {
        category = "iş_hukuku";
    } else if mentions_any(&text, CRIMINAL_KEYWORDS) {
        category = "ceza_hukuku";
    } else if mentions_any(&text, CONSUMER_KEYWORDS) {
        category = "tüketici_hukuku";
    }

    if family && mentions_any(&text, DOMESTIC_VIOLENCE_KEYWORDS) {
        category = "aile_hukuku";
    }

    debug!("Suggested category for template '{}': {}", template_name, category);
    category.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_display_names() {
        assert_eq!(display_name("borçlar_hukuku"), "BORÇLAR HUKUKU");
        assert_eq!(display_name("aile_hukuku"), "AİLE HUKUKU");
        assert_eq!(display_name("tüketici_hukuku"), "TÜKETİCİ HUKUKU");
    }

    #[test]
    fn test_unknown_category_is_uppercased() {
        assert_eq!(display_name("vergi_hukuku"), "VERGI_HUKUKU");
        assert_eq!(display_name(""), GENERAL_LABEL);
    }

    #[test]
    fn test_template_defaults() {
        assert_eq!(template_default("nafaka_davası"), Some("aile_hukuku"));
        assert_eq!(template_default("temyiz_dilekce"), Some("ceza_hukuku"));
        assert_eq!(template_default("bilinmeyen"), None);
    }

    #[test]
    fn test_suggest_uses_template_without_keywords() {
        assert_eq!(suggest("işe_iade", "Kira bedeli ödenmedi"), "iş_hukuku");
        assert_eq!(suggest("bilinmeyen", "Kira bedeli ödenmedi"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_suggest_keyword_order() {
        assert_eq!(suggest("dava_dilekce", "İşveren maaşımı ödemedi"), "iş_hukuku");
        assert_eq!(suggest("dava_dilekce", "Hırsızlık şikayeti"), "ceza_hukuku");
        assert_eq!(suggest("dava_dilekce", "Ayıplı mal teslim edildi"), "tüketici_hukuku");
        assert_eq!(suggest("ceza_davası", "Velayet ve nafaka talebi"), "aile_hukuku");
    }
}
