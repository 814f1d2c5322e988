//! Console and JSON output formatters

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::*;
use crate::processing::vocabulary::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

/// Renders the three report kinds the CLI prints
pub trait OutputFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String>;
    fn format_history(&self, report: &HistoryReport) -> Result<String>;
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and API integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that dispatches to the configured formatter
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n# {}\n", title)
        }
    }

    fn format_score(&self, score: f64) -> String {
        let color = match score {
            s if s >= 80.0 => Color::Green,
            s if s >= 60.0 => Color::Yellow,
            s if s >= 40.0 => Color::BrightYellow,
            _ => Color::Red,
        };
        let text = format!("{:.2}% [{}]", score, score_label(score));
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text
        }
    }

    fn format_skill_list(&self, skills: &SkillSet, color: Color) -> String {
        if skills.is_empty() {
            return "  (none)\n".to_string();
        }
        skills
            .iter()
            .map(|skill| format!("  • {}\n", self.colorize(skill, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SKILL SCAN"));
        output.push_str(&format!("Resume: {}\n", report.resume_file));
        if let Some(title) = &report.job_title {
            output.push_str(&format!("Position: {}\n", title));
        }
        output.push_str(&format!(
            "Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&format!("\nMatch Score: {}\n", self.format_score(report.result.score)));
        if report.required_skills.is_empty() {
            output.push_str(&self.colorize(
                "No recognised skills in the job description; score defaults to 0.\n",
                Color::BrightBlack,
            ));
        }

        output.push_str(&self.format_header(&format!("Resume Skills ({})", report.result.skills.len())));
        output.push_str(&self.format_skill_list(&report.result.skills, Color::Cyan));

        output.push_str(&self.format_header(&format!(
            "Matched Skills ({}/{})",
            report.result.matched_skills.len(),
            report.required_skills.len()
        )));
        output.push_str(&self.format_skill_list(&report.result.matched_skills, Color::Green));

        output.push_str(&self.format_header(&format!("Missing Skills ({})", report.result.missing_skills.len())));
        output.push_str(&self.format_skill_list(&report.result.missing_skills, Color::Red));

        if let Some(id) = report.analysis_id {
            output.push_str(&format!("\nSaved as analysis #{}\n", id));
        }

        Ok(output)
    }

    fn format_history(&self, report: &HistoryReport) -> Result<String> {
        let mut output = self.format_header("ANALYSIS HISTORY");

        if report.entries.is_empty() {
            output.push_str("No analyses recorded yet.\n");
            return Ok(output);
        }

        for entry in &report.entries {
            output.push_str(&format!(
                "{}  {:<32} {:>7.2}%  {}\n",
                self.colorize(&entry.analysis_date, Color::BrightBlack),
                entry.resume_name,
                entry.match_score,
                entry.skills_matched.join(", ")
            ));
        }

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = self.format_header("RESUME RANKING (TF-IDF)");
        output.push_str(&format!("Job description: {}\n\n", report.job_file));

        for entry in &report.entries {
            let similarity = format!("{:.4}", entry.similarity);
            output.push_str(&format!(
                "{:>3}. {}  {}\n",
                entry.rank,
                self.colorize(&similarity, Color::Cyan),
                entry.resume_file
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scan(&self, report: &ScanReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_history(&self, report: &HistoryReport) -> Result<String> {
        // history is a bare array of entries
        self.to_json(&report.entries)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output),
            json_formatter: JsonFormatter::new(config.pretty_json),
        }
    }

    pub fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
