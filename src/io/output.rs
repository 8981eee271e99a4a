use crate::aggregate::{Correlation, GroupMean};
use crate::cli::OutputFormat;
use crate::core::{NumericField, Record, Table};
use crate::filter::{CategorySelection, FilterSpec, NumericRange};
use crate::formatting::{FormattingConfig, OutputFormatter};
use crate::normalize::DataQualityReport;
use crate::pipeline::DashboardView;
use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{ContentArrangement, Table as ComfyTable};
use std::io::Write;

pub trait OutputWriter {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()>;
    fn write_quality(&mut self, report: &DataQualityReport) -> anyhow::Result<()>;
}

/// One titled table of a rendered report.
struct Section {
    title: String,
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Section {
    fn new(title: impl Into<String>, header: Vec<&'static str>, rows: Vec<Vec<String>>) -> Self {
        Self {
            title: title.into(),
            header,
            rows,
        }
    }
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn format_correlation(value: Correlation) -> String {
    match value {
        Correlation::Defined(v) => format!("{v:.3}"),
        Correlation::Undefined => "undefined".to_string(),
    }
}

fn describe_selection(selection: &CategorySelection) -> Option<String> {
    (!selection.is_unrestricted()).then(|| selection.values().collect::<Vec<_>>().join(", "))
}

fn describe_range(range: &NumericRange) -> String {
    let min = range.min.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    let max = range.max.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    format!("{min} .. {max}")
}

/// Human-readable summary of the active filter, `"none"` when unrestricted.
pub fn describe_filter(spec: &FilterSpec) -> String {
    let mut parts = Vec::new();
    if let Some(types) = describe_selection(&spec.service_types) {
        parts.push(format!("type: {types}"));
    }
    if let Some(online) = describe_selection(&spec.online_order) {
        parts.push(format!("online order: {online}"));
    }
    if let Some(book) = describe_selection(&spec.book_table) {
        parts.push(format!("book table: {book}"));
    }
    if let Some(range) = &spec.rating {
        parts.push(format!("rating: {}", describe_range(range)));
    }
    if let Some(range) = &spec.cost_for_two {
        parts.push(format!("cost for two: {}", describe_range(range)));
    }

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join("; ")
    }
}

fn record_row(record: &Record) -> Vec<String> {
    vec![
        record.name.clone(),
        record.service_type.clone(),
        format_value(record.rating),
        record
            .votes
            .map(|v| v.to_string())
            .unwrap_or_else(|| "n/a".to_string()),
        format_value(record.cost_for_two),
        record
            .online_order
            .map(|f| f.as_str().to_string())
            .unwrap_or_default(),
        record
            .book_table
            .map(|f| f.as_str().to_string())
            .unwrap_or_default(),
    ]
}

fn records_section(title: &str, table: &Table) -> Section {
    Section::new(
        title,
        vec!["Name", "Type", "Rating", "Votes", "Cost for two", "Online", "Book"],
        table.iter().map(record_row).collect(),
    )
}

fn group_section(title: &str, group_label: &'static str, means: &[GroupMean]) -> Section {
    Section::new(
        title,
        vec![group_label, "Mean", "Rows"],
        means
            .iter()
            .map(|g| vec![g.group.clone(), format!("{:.2}", g.mean), g.count.to_string()])
            .collect(),
    )
}

fn dashboard_sections(view: &DashboardView) -> Vec<Section> {
    let kpis = Section::new(
        "Key figures",
        vec!["Metric", "Value"],
        vec![
            vec![
                "Total restaurants".to_string(),
                view.kpis.total_restaurants.to_string(),
            ],
            vec!["Mean rating".to_string(), format_value(view.kpis.mean_rating)],
            vec![
                "Mean cost for two".to_string(),
                format_value(view.kpis.mean_cost_for_two),
            ],
        ],
    );

    let types = Section::new(
        "Restaurant types",
        vec!["Type", "Count"],
        view.type_distribution
            .iter()
            .map(|c| vec![c.value.clone(), c.count.to_string()])
            .collect(),
    );

    let histogram = Section::new(
        "Rating distribution",
        vec!["From", "To", "Count"],
        view.rating_histogram
            .bins
            .iter()
            .map(|b| {
                vec![
                    format!("{:.2}", b.lower),
                    format!("{:.2}", b.upper),
                    b.count.to_string(),
                ]
            })
            .collect(),
    );

    let correlation = Section::new(
        "Correlation",
        vec!["", "rate", "votes", "cost_for_two"],
        NumericField::ALL
            .iter()
            .map(|row| {
                std::iter::once(row.column_name().to_string())
                    .chain(
                        NumericField::ALL
                            .iter()
                            .map(|col| format_correlation(view.correlation.get(*row, *col))),
                    )
                    .collect()
            })
            .collect(),
    );

    let trend = Section::new(
        "Rating vs cost trend",
        vec!["Slope", "Intercept", "Points"],
        view.cost_rating_trend
            .iter()
            .map(|t| {
                vec![
                    format!("{:.6}", t.slope),
                    format!("{:.3}", t.intercept),
                    t.points.to_string(),
                ]
            })
            .collect(),
    );

    let combination = Section::new(
        "Online order and table booking",
        vec!["Offer", "Count"],
        vec![
            vec!["Both".to_string(), view.feature_combination.both.to_string()],
            vec!["Other".to_string(), view.feature_combination.other.to_string()],
        ],
    );

    vec![
        kpis,
        types,
        histogram,
        group_section(
            "Rating by online order",
            "Online order",
            &view.rating_by_online_order,
        ),
        group_section("Rating by table booking", "Book table", &view.rating_by_book_table),
        group_section("Cost for two by type", "Type", &view.cost_by_type),
        correlation,
        trend,
        records_section("Most voted", &view.most_voted),
        records_section("Least voted", &view.least_voted),
        combination,
    ]
}

fn quality_sections(report: &DataQualityReport) -> Vec<Section> {
    let counts = Section::new(
        "Rows",
        vec!["Metric", "Value"],
        vec![
            vec!["Policy".to_string(), report.policy.as_str().to_string()],
            vec!["Read".to_string(), report.rows_read.to_string()],
            vec!["Kept".to_string(), report.rows_kept.to_string()],
            vec!["Dropped".to_string(), report.rows_dropped.to_string()],
            vec![
                "Votes defaulted to 0".to_string(),
                report.votes_defaulted.to_string(),
            ],
            vec![
                "Unparseable ratings".to_string(),
                report.failures.rating.to_string(),
            ],
            vec![
                "Unparseable votes".to_string(),
                report.failures.votes.to_string(),
            ],
            vec![
                "Unparseable costs".to_string(),
                report.failures.cost_for_two.to_string(),
            ],
        ],
    );

    let mapping = Section::new(
        "Columns",
        vec!["Canonical", "Source header"],
        report
            .column_mapping
            .iter()
            .map(|(canonical, source)| vec![canonical.clone(), source.clone()])
            .chain(
                report
                    .missing_columns
                    .iter()
                    .map(|c| vec![c.clone(), "(missing)".to_string()]),
            )
            .chain(
                report
                    .extra_columns
                    .iter()
                    .map(|c| vec!["(pass-through)".to_string(), c.clone()]),
            )
            .collect(),
    );

    let unrecognized = Section::new(
        "Unrecognized Yes/No values",
        vec!["Row", "Column", "Value"],
        report
            .unrecognized_flags
            .iter()
            .map(|u| vec![u.row.to_string(), u.column.to_string(), u.value.clone()])
            .collect(),
    );

    vec![counts, mapping, unrecognized]
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(view)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_quality(&mut self, report: &DataQualityReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_section(&mut self, section: &Section) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", section.title)?;
        writeln!(self.writer)?;
        if section.rows.is_empty() {
            writeln!(self.writer, "_No data_")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| {} |", section.header.join(" | "))?;
        let rule = vec!["---"; section.header.len()].join("|");
        writeln!(self.writer, "|{rule}|")?;
        for row in &section.rows {
            let cells: Vec<String> = row.iter().map(|c| escape_markdown(c)).collect();
            writeln!(self.writer, "| {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_markdown(cell: &str) -> String {
    cell.replace('|', "\\|")
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(self.writer, "# Restaurant Dashboard")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "Filters: {}", describe_filter(&view.filter))?;
        writeln!(self.writer)?;
        for section in dashboard_sections(view) {
            self.write_section(&section)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_quality(&mut self, report: &DataQualityReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Data Quality Report")?;
        writeln!(self.writer)?;
        for section in quality_sections(report) {
            self.write_section(&section)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatting.formatter(),
        }
    }

    fn write_section(&mut self, section: &Section) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header(&section.title))?;
        if section.rows.is_empty() {
            writeln!(self.writer, "  {}", self.formatter.dim("no data"))?;
            writeln!(self.writer)?;
            return Ok(());
        }

        let mut table = ComfyTable::new();
        if self.formatter.uses_color() {
            table.load_preset(UTF8_FULL);
        } else {
            // plain output never wraps to the terminal width
            table.load_preset(ASCII_FULL).force_no_tty();
        }
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(section.header.clone());
        for row in &section.rows {
            table.add_row(row.clone());
        }
        writeln!(self.writer, "{table}")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_dashboard(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.bold("Restaurant Dashboard")
        )?;
        writeln!(
            self.writer,
            "Filters: {}",
            self.formatter.dim(&describe_filter(&view.filter))
        )?;
        writeln!(self.writer)?;
        for section in dashboard_sections(view) {
            self.write_section(&section)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_quality(&mut self, report: &DataQualityReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.bold("Data Quality Report"))?;
        let status = if report.has_concerns() {
            self.formatter.warning("issues found")
        } else {
            self.formatter.success("clean")
        };
        writeln!(self.writer, "Status: {status}")?;
        writeln!(self.writer)?;
        for section in quality_sections(report) {
            self.write_section(&section)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer(
    format: OutputFormat,
    writer: Box<dyn Write>,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}
