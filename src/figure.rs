use crate::data::query::{CorrelationPoint, SiteFilter, SiteSummary};

// ---------------------------------------------------------------------------
// Chart-ready figures produced by the callbacks
// ---------------------------------------------------------------------------

/// Output of a callback handler, rendered by the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Figure::Pie(p) => &p.title,
            Figure::Scatter(s) => &s.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Fraction of the whole pie in `0.0..=1.0`.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn from_summary(summary: &SiteSummary) -> Self {
        let title = match &summary.site {
            SiteFilter::All => "Total Successful launches by Site".to_string(),
            SiteFilter::Site(s) => format!("Total Successful launches for site {s}"),
        };

        let total = summary.total();
        let slices = summary
            .slices
            .iter()
            .map(|s| PieSlice {
                label: s.key.to_string(),
                count: s.count,
                share: if total == 0 {
                    0.0
                } else {
                    s.count as f64 / total as f64
                },
            })
            .collect();

        PieFigure { title, slices }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Points sharing one booster category, drawn in one colour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub booster_category: String,
    pub points: Vec<CorrelationPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: String,
    /// Series in order of first appearance of their category.
    pub series: Vec<ScatterSeries>,
    /// All points in dataset order, for the record table.
    pub points: Vec<CorrelationPoint>,
}

impl ScatterFigure {
    pub fn from_points(site: &SiteFilter, points: Vec<CorrelationPoint>) -> Self {
        let title = match site {
            SiteFilter::All => "Correlation between Payload and Success for all Sites".to_string(),
            SiteFilter::Site(s) => format!("Correlation between Payload and Success for site {s}"),
        };

        let mut series: Vec<ScatterSeries> = Vec::new();
        for p in &points {
            match series
                .iter_mut()
                .find(|s| s.booster_category == p.booster_category)
            {
                Some(s) => s.points.push(p.clone()),
                None => series.push(ScatterSeries {
                    booster_category: p.booster_category.clone(),
                    points: vec![p.clone()],
                }),
            }
        }

        ScatterFigure {
            title,
            series,
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
