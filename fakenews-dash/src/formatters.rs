use crate::models::{NewsSource, Prediction};
use anyhow::Result;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;

#[derive(Serialize)]
struct HeadlinesOutput<'a> {
    source: NewsSource,
    count: usize,
    headlines: &'a [String],
}

pub fn format_headlines_table(source: NewsSource, headlines: &[String]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(vec![
        Cell::new("#").style_spec("bFc"),
        Cell::new(&format!("{} Headlines", source.display_name())).style_spec("bFc"),
    ]));

    for (i, headline) in headlines.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&(i + 1).to_string()),
            Cell::new(headline),
        ]));
    }

    table.to_string()
}

pub fn format_headlines_json(source: NewsSource, headlines: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&HeadlinesOutput {
        source,
        count: headlines.len(),
        headlines,
    })?)
}

pub fn format_headlines_csv(source: NewsSource, headlines: &[String]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Rank", "Source", "Headline"])?;
    for (i, headline) in headlines.iter().enumerate() {
        writer.write_record([(i + 1).to_string().as_str(), source.as_str(), headline.as_str()])?;
    }
    Ok(String::from_utf8(writer.into_inner()?)?)
}

pub fn format_prediction_table(text: &str, prediction: &Prediction) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(vec![
        Cell::new("Text").style_spec("bFc"),
        Cell::new("Prediction").style_spec("bFc"),
        Cell::new("Confidence").style_spec("bFc"),
    ]));
    table.add_row(Row::new(vec![
        Cell::new(text),
        Cell::new(&prediction.prediction).style_spec(label_style(&prediction.prediction)),
        Cell::new(prediction.confidence.as_str()),
    ]));
    table.to_string()
}

pub fn format_prediction_json(prediction: &Prediction) -> Result<String> {
    Ok(serde_json::to_string_pretty(prediction)?)
}

pub fn format_prediction_csv(text: &str, prediction: &Prediction) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Text", "Prediction", "Confidence"])?;
    writer.write_record([text, prediction.prediction.as_str(), prediction.confidence.as_str()])?;
    Ok(String::from_utf8(writer.into_inner()?)?)
}

fn label_style(label: &str) -> &'static str {
    let label = label.to_ascii_lowercase();
    if label.contains("fake") || label.contains("unverified") {
        "bFr"
    } else if label.contains("partial") {
        "bFy"
    } else {
        "bFg"
    }
}

pub fn format_prediction_summary(prediction: &Prediction) -> String {
    let label = prediction.prediction.as_str();
    let colored_label = match label_style(label) {
        "bFr" => label.red().bold(),
        "bFy" => label.yellow().bold(),
        _ => label.green().bold(),
    };
    format!(
        "\n{} {}\n  Confidence: {}\n",
        "Verdict:".bright_cyan().bold(),
        colored_label,
        prediction.confidence.as_str().cyan()
    )
}
