use serde::{Deserialize, Serialize};

/// Dashboard tabs, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Farm,
    Sensors,
    Crops,
    Market,
    Yield,
    Recommendations,
    Weather,
    Insights,
    Chat,
}

impl Tab {
    pub const ALL: [Self; 9] = [
        Self::Farm,
        Self::Sensors,
        Self::Crops,
        Self::Market,
        Self::Yield,
        Self::Recommendations,
        Self::Weather,
        Self::Insights,
        Self::Chat,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Farm => "farm",
            Self::Sensors => "sensors",
            Self::Crops => "crops",
            Self::Market => "market",
            Self::Yield => "yield",
            Self::Recommendations => "recommendations",
            Self::Weather => "weather",
            Self::Insights => "insights",
            Self::Chat => "chatbot",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Farm),
            1 => Some(Self::Sensors),
            2 => Some(Self::Crops),
            3 => Some(Self::Market),
            4 => Some(Self::Yield),
            5 => Some(Self::Recommendations),
            6 => Some(Self::Weather),
            7 => Some(Self::Insights),
            8 => Some(Self::Chat),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Farm => 0,
            Self::Sensors => 1,
            Self::Crops => 2,
            Self::Market => 3,
            Self::Yield => 4,
            Self::Recommendations => 5,
            Self::Weather => 6,
            Self::Insights => 7,
            Self::Chat => 8,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "farm" => Some(Self::Farm),
            "sensors" => Some(Self::Sensors),
            "crops" => Some(Self::Crops),
            "market" => Some(Self::Market),
            "yield" => Some(Self::Yield),
            "recommendations" => Some(Self::Recommendations),
            "weather" => Some(Self::Weather),
            "insights" => Some(Self::Insights),
            "chatbot" | "chat" => Some(Self::Chat),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Farm => "My Farm",
            Self::Sensors => "Sensors",
            Self::Crops => "Crops",
            Self::Market => "Market",
            Self::Yield => "Predict Yield",
            Self::Recommendations => "Recommend",
            Self::Weather => "Weather",
            Self::Insights => "Insights",
            Self::Chat => "AI Chat",
        }
    }

    /// The cached data domain backing this tab, if any.
    ///
    /// The farm tab borrows the weather series for its conditions chart.
    /// Yield and recommendation forms talk to the backend directly and are
    /// never cached.
    pub const fn domain(self) -> Option<DataDomain> {
        match self {
            Self::Farm => Some(DataDomain::Weather),
            Self::Market => Some(DataDomain::Market),
            Self::Weather => Some(DataDomain::WeatherAnalysis),
            Self::Insights => Some(DataDomain::Insights),
            Self::Sensors
            | Self::Crops
            | Self::Yield
            | Self::Recommendations
            | Self::Chat => None,
        }
    }
}

/// One category of backend-sourced information held in a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataDomain {
    Weather,
    Market,
    Insights,
    WeatherAnalysis,
}

impl DataDomain {
    pub const ALL: [Self; 4] = [
        Self::Weather,
        Self::Market,
        Self::Insights,
        Self::WeatherAnalysis,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Market => "market",
            Self::Insights => "insights",
            Self::WeatherAnalysis => "weather-analysis",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weather => "Weather",
            Self::Market => "Market Rates",
            Self::Insights => "Insights",
            Self::WeatherAnalysis => "Weather Analysis",
        }
    }
}

impl std::fmt::Display for DataDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_index_round_trips_through_from_index() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_index(tab.index()), Some(tab));
        }
        assert_eq!(Tab::from_index(Tab::ALL.len()), None);
    }

    #[test]
    fn only_data_tabs_have_a_domain() {
        assert_eq!(Tab::Market.domain(), Some(DataDomain::Market));
        assert_eq!(Tab::Insights.domain(), Some(DataDomain::Insights));
        assert_eq!(Tab::Yield.domain(), None);
        assert_eq!(Tab::Chat.domain(), None);
    }

    #[test]
    fn parse_accepts_both_chat_spellings() {
        assert_eq!(Tab::parse(" Chatbot "), Some(Tab::Chat));
        assert_eq!(Tab::parse("chat"), Some(Tab::Chat));
        assert_eq!(Tab::parse("dashboard"), None);
    }
}
