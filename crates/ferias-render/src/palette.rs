//! Department colours

use ferias_core::LegendEntry;
use std::collections::HashMap;

/// Built-in department colours
pub const DEPARTMENT_COLORS: [(&str, &str); 5] = [
    ("MB", "#2E86AB"),
    ("MEC", "#A569BD"),
    ("MA", "#F1C40F"),
    ("Financeiro", "#16A085"),
    ("Comercial", "#E67E22"),
];

/// Colours handed out to departments without an explicit entry
pub const FALLBACK_COLORS: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Department → colour lookup with a fallback sequence
#[derive(Clone, Debug)]
pub struct DepartmentPalette {
    colors: HashMap<String, String>,
    fallback: Vec<String>,
}

impl Default for DepartmentPalette {
    fn default() -> Self {
        Self {
            colors: DEPARTMENT_COLORS
                .iter()
                .map(|(d, c)| ((*d).to_string(), (*c).to_string()))
                .collect(),
            fallback: FALLBACK_COLORS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl DepartmentPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or override a department colour
    pub fn with_color(mut self, department: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(department.into(), color.into());
        self
    }

    /// Explicit colour for a department, if any
    pub fn get(&self, department: &str) -> Option<&str> {
        self.colors.get(department).map(String::as_str)
    }

    /// Colour every distinct department in order of first appearance.
    ///
    /// Unmapped departments take the next fallback colour, cycling when
    /// the sequence runs out.
    pub fn assign<'a>(&self, departments: impl IntoIterator<Item = &'a str>) -> Vec<LegendEntry> {
        let mut legend: Vec<LegendEntry> = Vec::new();
        let mut unmapped = 0;
        for department in departments {
            if legend.iter().any(|e| e.department == department) {
                continue;
            }
            let color = match self.get(department) {
                Some(c) => c.to_string(),
                None => {
                    let c = self.fallback[unmapped % self.fallback.len()].clone();
                    unmapped += 1;
                    c
                }
            };
            legend.push(LegendEntry {
                department: department.to_string(),
                color,
            });
        }
        legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_colors() {
        let palette = DepartmentPalette::new();
        assert_eq!(palette.get("MB"), Some("#2E86AB"));
        assert_eq!(palette.get("MEC"), Some("#A569BD"));
        assert_eq!(palette.get("MA"), Some("#F1C40F"));
        assert_eq!(palette.get("Financeiro"), Some("#16A085"));
        assert_eq!(palette.get("Comercial"), Some("#E67E22"));
        assert_eq!(palette.get("RH"), None);
    }

    #[test]
    fn with_color_extends_and_overrides() {
        let palette = DepartmentPalette::new()
            .with_color("RH", "#123456")
            .with_color("MB", "#000000");
        assert_eq!(palette.get("RH"), Some("#123456"));
        assert_eq!(palette.get("MB"), Some("#000000"));
    }

    #[test]
    fn assign_is_distinct_and_first_seen() {
        let legend = DepartmentPalette::new().assign(["MA", "MB", "MA", "RH", "TI", "RH"]);
        let pairs: Vec<_> = legend
            .iter()
            .map(|e| (e.department.as_str(), e.color.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("MA", "#F1C40F"),
                ("MB", "#2E86AB"),
                ("RH", FALLBACK_COLORS[0]),
                ("TI", FALLBACK_COLORS[1]),
            ]
        );
    }

    #[test]
    fn fallback_sequence_cycles() {
        let names: Vec<String> = (0..12).map(|i| format!("D{i}")).collect();
        let legend = DepartmentPalette::new().assign(names.iter().map(String::as_str));
        assert_eq!(legend[10].color, FALLBACK_COLORS[0]);
        assert_eq!(legend[11].color, FALLBACK_COLORS[1]);
    }
}
