//! Keyword-based sector tagging and the static informality-rate table.

use crate::domain::model::Sector;

/// Sectors in match priority order with their keywords. The first sector
/// with any keyword present wins; nothing is scored.
const SECTOR_KEYWORDS: [(Sector, &[&str]); 5] = [
    (Sector::Industry, &["indústria", "produção", "fábrica"]),
    (Sector::Commerce, &["vendas", "comércio", "loja"]),
    (
        Sector::GeneralServices,
        &["serviços gerais", "limpeza", "manutenção"],
    ),
    (Sector::Health, &["saúde", "hospital", "clínica"]),
    (Sector::Construction, &["construção", "construtor", "obra"]),
];

const INFORMALITY_RATES: [(Sector, u8); 6] = [
    (Sector::Industry, 10),
    (Sector::Commerce, 40),
    (Sector::GeneralServices, 50),
    (Sector::Health, 15),
    (Sector::Construction, 30),
    (Sector::Other, 20),
];

pub const DEFAULT_INFORMALITY_RATE: u8 = 20;

pub fn classify(title: &str, snippet: &str) -> Sector {
    let text = format!("{} {}", title, snippet).to_lowercase();

    SECTOR_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(sector, _)| *sector)
        .unwrap_or(Sector::Other)
}

pub fn informality_rate(sector: Sector) -> u8 {
    INFORMALITY_RATES
        .iter()
        .find(|(s, _)| *s == sector)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_INFORMALITY_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("Vaga para produção industrial", ""), Sector::Industry);
        assert_eq!(classify("Vendedor de loja", ""), Sector::Commerce);
        assert_eq!(classify("", ""), Sector::Other);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("AUXILIAR DE LIMPEZA", ""), Sector::GeneralServices);
        assert_eq!(classify("Técnico", "Atuação em HOSPITAL regional"), Sector::Health);
    }

    #[test]
    fn test_classify_uses_snippet() {
        assert_eq!(classify("Vaga em Ivaiporã", "mestre de obras"), Sector::Construction);
    }

    #[test]
    fn test_first_match_wins() {
        // Commerce and Industry keywords both present; Industry is checked first
        assert_eq!(classify("Vendedor de loja", "na fábrica"), Sector::Industry);
        assert_eq!(classify("Limpeza hospitalar", "hospital"), Sector::GeneralServices);
    }

    #[test]
    fn test_keyword_may_span_title_and_snippet_boundary() {
        // title and snippet are joined with a single space before matching
        assert_eq!(classify("Auxiliar de serviços", "gerais"), Sector::GeneralServices);
    }

    #[test]
    fn test_unmatched_text_is_other() {
        assert_eq!(classify("Motorista", "categoria D"), Sector::Other);
    }

    #[test]
    fn test_classify_always_returns_known_sector() {
        let samples = [
            ("", ""),
            ("Vaga em fábrica", "produção"),
            ("Recepcionista", "clínica odontológica"),
            ("🚚 entregador", "∑ unicode"),
            ("Construtor", ""),
        ];
        for (title, snippet) in samples {
            assert!(Sector::ALL.contains(&classify(title, snippet)));
        }
    }

    #[test]
    fn test_informality_rates() {
        assert_eq!(informality_rate(Sector::Other), 20);
        assert_eq!(informality_rate(Sector::Construction), 30);
        assert_eq!(informality_rate(Sector::Industry), 10);
        assert_eq!(informality_rate(Sector::Commerce), 40);
        assert_eq!(informality_rate(Sector::GeneralServices), 50);
        assert_eq!(informality_rate(Sector::Health), 15);
    }
}
