use crate::errors::DiaError;
use crate::palette;
use crate::project::ChartType;

pub fn parse_chart_type(s: &str) -> Result<ChartType, DiaError> {
    ChartType::ALL
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| DiaError::InvalidArgument(format!("unknown chart type {s:?}")))
}

pub fn check_scheme(s: &str) -> Result<&str, DiaError> {
    if palette::is_known(s) {
        Ok(s)
    } else {
        Err(DiaError::InvalidArgument(format!("unknown color scheme {s:?}")))
    }
}

/// Accepts `#RRGGBB`; the codec itself stores any non-empty color verbatim.
pub fn check_color(s: &str) -> Result<String, DiaError> {
    let hex = s.strip_prefix('#').unwrap_or_default();
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(format!("#{}", hex.to_ascii_uppercase()))
    } else {
        Err(DiaError::InvalidArgument(format!("color must look like #RRGGBB, got {s:?}")))
    }
}
