use crate::domain::model::{DashboardView, JobListing, NeighborhoodSummary, RadarReport, SectorSummary};
use crate::utils::error::Result;

pub const TITLE: &str = "TrampoLocal - Radar de Oportunidades";
const BAR_WIDTH: usize = 30;
const TITLE_WIDTH: usize = 48;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

pub fn render_json(report: &RadarReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Full terminal report: header, notices, then every dashboard section.
pub fn render_text(report: &RadarReport, top: usize) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        format!("Consulta: {}", report.query),
        format!(
            "Gerado em: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        String::new(),
    ];

    for notice in &report.notices {
        lines.push(format!("⚠ {}", notice.message()));
    }
    if !report.notices.is_empty() {
        lines.push(String::new());
    }

    if report.duplicates_dropped > 0 {
        lines.push(format!(
            "{} vaga(s) duplicada(s) removida(s)",
            report.duplicates_dropped
        ));
        lines.push(String::new());
    }

    if !report.view.is_empty() {
        lines.push(render_view(&report.view, top));
    }

    lines.join("\n")
}

/// Dashboard sections for one (possibly filtered) view.
pub fn render_view(view: &DashboardView, top: usize) -> String {
    if view.is_empty() {
        return "Nenhuma vaga encontrada para os filtros selecionados.".to_string();
    }

    [
        listing_table(&view.listings),
        sector_bars(&view.sector_summary),
        sector_distribution(&view.sector_summary),
        neighborhood_table(&view.neighborhood_summary),
        listing_cards(&view.listings),
        top_listings(view.top(top)),
    ]
    .join("\n\n")
}

fn listing_table(listings: &[JobListing]) -> String {
    let mut lines = vec![
        format!("### Dados Carregados ({} vagas)", listings.len()),
        format!(
            "{:<18} {:>6} {:<12} {}",
            "Setor", "Inf.%", "Bairro", "Título"
        ),
    ];

    for listing in listings {
        lines.push(format!(
            "{:<18} {:>6} {:<12} {}",
            listing.sector().label(),
            listing.informality_rate(),
            truncate(listing.neighborhood(), 12),
            truncate(listing.title(), TITLE_WIDTH)
        ));
    }

    lines.join("\n")
}

fn sector_bars(summary: &[SectorSummary]) -> String {
    let max = summary.iter().map(|s| s.total_count).max().unwrap_or(0);
    let mut lines = vec!["## Setores que mais empregam".to_string()];

    for entry in summary {
        let width = if max == 0 {
            0
        } else {
            // 至少畫一格
            ((entry.total_count as usize * BAR_WIDTH) / max as usize).max(1)
        };
        lines.push(format!(
            "{:<18} {} {}",
            entry.sector.label(),
            "█".repeat(width),
            entry.total_count
        ));
    }

    lines.join("\n")
}

fn sector_distribution(summary: &[SectorSummary]) -> String {
    let total: u32 = summary.iter().map(|s| s.total_count).sum();
    let mut lines = vec!["## Distribuição dos Empregos por Setor".to_string()];

    for entry in summary {
        let share = if total == 0 {
            0.0
        } else {
            f64::from(entry.total_count) * 100.0 / f64::from(total)
        };
        lines.push(format!("{:<18} {:>5.1}%", entry.sector.label(), share));
    }

    lines.join("\n")
}

fn neighborhood_table(summary: &[NeighborhoodSummary]) -> String {
    let mut lines = vec![
        "## Informalidade por Bairro".to_string(),
        format!("{:<18} {:>8}", "Bairro", "Inf.%"),
    ];

    for entry in summary {
        lines.push(format!(
            "{:<18} {:>8.1}",
            truncate(&entry.neighborhood, 18),
            entry.mean_informality_rate
        ));
    }

    lines.join("\n")
}

fn listing_cards(listings: &[JobListing]) -> String {
    let mut lines = vec!["## Detalhes das Vagas".to_string()];

    for listing in listings {
        lines.push(format!("Título: {}", listing.title()));
        lines.push(format!("Setor Econômico: {}", listing.sector()));
        lines.push(format!(
            "Taxa de Informalidade: {}%",
            listing.informality_rate()
        ));
        lines.push(format!("Resumo: {}", listing.snippet()));
        lines.push(format!("Salário: {}", listing.salary_label()));
        lines.push(format!("Acessar Vaga: {}", listing.link()));
        lines.push("---".to_string());
    }

    lines.join("\n")
}

fn top_listings(listings: &[JobListing]) -> String {
    let mut lines = vec![format!("## Top {} Vagas", listings.len())];

    for (rank, listing) in listings.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({})",
            rank + 1,
            listing.title(),
            listing.sector()
        ));
        lines.push(format!("   {}", listing.link()));
    }

    lines.join("\n")
}
