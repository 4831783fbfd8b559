use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use krishi_mate::location::format_location;
use krishi_mate::models::{FarmerProfile, YieldMetadata, YieldPrediction, YieldRequest};
use krishi_mate::regions::{districts, fuzzy_filter, states};

pub const MAIN_CROPS: [&str; 7] = [
    "Wheat",
    "Rice",
    "Maize",
    "Potato",
    "Sugarcane",
    "Cotton",
    "Mustard",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Mobile,
    State,
    District,
    FarmSize,
    MainCrop,
}

impl LoginField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Mobile,
        Self::State,
        Self::District,
        Self::FarmSize,
        Self::MainCrop,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Mobile => "Mobile Number",
            Self::State => "State",
            Self::District => "District",
            Self::FarmSize => "Farm Size (acres)",
            Self::MainCrop => "Main Crop",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Mobile => 1,
            Self::State => 2,
            Self::District => 3,
            Self::FarmSize => 4,
            Self::MainCrop => 5,
        }
    }

    pub const fn next(self) -> Self {
        Self::ALL[wrap_increment(self.index(), Self::ALL.len())]
    }

    pub const fn prev(self) -> Self {
        Self::ALL[wrap_decrement(self.index(), Self::ALL.len())]
    }

    pub const fn is_picker(self) -> bool {
        matches!(self, Self::State | Self::District)
    }
}

/// Sign-up form. State and district are typed as fuzzy queries and
/// committed from the ranked choices.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub field: LoginField,
    pub name: String,
    pub mobile: String,
    pub state_query: String,
    pub state: Option<&'static str>,
    pub district_query: String,
    pub district: Option<&'static str>,
    pub farm_size: String,
    pub main_crop: Option<usize>,
    pub picker_index: usize,
}

impl LoginForm {
    pub fn choices(&self) -> Vec<&'static str> {
        match self.field {
            LoginField::State => fuzzy_filter(&states(), &self.state_query),
            LoginField::District => self
                .state
                .map(|state| fuzzy_filter(districts(state), &self.district_query))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Name => &self.name,
            LoginField::Mobile => &self.mobile,
            LoginField::State => &self.state_query,
            LoginField::District => &self.district_query,
            LoginField::FarmSize => &self.farm_size,
            LoginField::MainCrop => self.main_crop.map_or("", |index| MAIN_CROPS[index]),
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            LoginField::Name => self.name.push(c),
            LoginField::Mobile if c.is_ascii_digit() && self.mobile.len() < 10 => {
                self.mobile.push(c);
            }
            LoginField::State => {
                self.state_query.push(c);
                self.state = None;
                self.district = None;
                self.district_query.clear();
                self.picker_index = 0;
            }
            LoginField::District => {
                self.district_query.push(c);
                self.district = None;
                self.picker_index = 0;
            }
            LoginField::FarmSize if c.is_ascii_digit() || c == '.' => self.farm_size.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            LoginField::Name => {
                self.name.pop();
            }
            LoginField::Mobile => {
                self.mobile.pop();
            }
            LoginField::State => {
                self.state_query.pop();
                self.state = None;
                self.district = None;
                self.district_query.clear();
                self.picker_index = 0;
            }
            LoginField::District => {
                self.district_query.pop();
                self.district = None;
                self.picker_index = 0;
            }
            LoginField::FarmSize => {
                self.farm_size.pop();
            }
            LoginField::MainCrop => self.main_crop = None,
        }
    }

    pub fn move_picker(&mut self, forward: bool) {
        if self.field == LoginField::MainCrop {
            self.main_crop = Some(match (self.main_crop, forward) {
                (None, _) => 0,
                (Some(index), true) => wrap_increment(index, MAIN_CROPS.len()),
                (Some(index), false) => wrap_decrement(index, MAIN_CROPS.len()),
            });
            return;
        }

        let len = self.choices().len();
        self.picker_index = if forward {
            wrap_increment(self.picker_index, len)
        } else {
            wrap_decrement(self.picker_index, len)
        };
    }

    /// Takes the highlighted choice for the focused picker field.
    /// Returns false when nothing matches the query.
    pub fn commit_choice(&mut self) -> bool {
        let Some(choice) = self.choices().get(self.picker_index).copied() else {
            return false;
        };

        match self.field {
            LoginField::State => {
                if self.state != Some(choice) {
                    self.district = None;
                    self.district_query.clear();
                }
                self.state = Some(choice);
                self.state_query = choice.to_string();
            }
            LoginField::District => {
                self.district = Some(choice);
                self.district_query = choice.to_string();
            }
            _ => return false,
        }
        self.picker_index = 0;
        true
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
        self.picker_index = 0;
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
        self.picker_index = 0;
    }

    /// Builds the profile to store, naming the first missing field otherwise.
    pub fn to_profile(&self) -> Result<FarmerProfile, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Please enter your name".to_string());
        }
        if self.mobile.len() != 10 {
            return Err("Mobile number must have 10 digits".to_string());
        }
        let Some(state) = self.state else {
            return Err("Please select your state".to_string());
        };
        let Some(district) = self.district else {
            return Err("Please select your district".to_string());
        };
        let farm_size = self.farm_size.trim();
        if !farm_size.is_empty() && farm_size.parse::<f64>().map_or(true, |size| size <= 0.0) {
            return Err("Farm size must be a positive number".to_string());
        }

        Ok(FarmerProfile {
            name: name.to_string(),
            mobile: self.mobile.clone(),
            location: format_location(district, state),
            main_crop: self.main_crop.map(|index| MAIN_CROPS[index].to_string()),
            farm_size: (!farm_size.is_empty()).then(|| farm_size.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YieldField {
    #[default]
    State,
    District,
    Season,
    Crop,
    Area,
}

impl YieldField {
    pub const ALL: [Self; 5] = [
        Self::State,
        Self::District,
        Self::Season,
        Self::Crop,
        Self::Area,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::District => "District",
            Self::Season => "Season",
            Self::Crop => "Crop",
            Self::Area => "Area (hectares)",
        }
    }
}

/// Yield prediction form. Options come from the backend metadata and the
/// district list follows the chosen state.
#[derive(Debug, Default)]
pub struct YieldForm {
    pub metadata: Option<YieldMetadata>,
    pub metadata_error: Option<String>,
    pub focus: usize,
    pub state: Option<usize>,
    pub district: Option<usize>,
    pub season: Option<usize>,
    pub crop: Option<usize>,
    pub area: String,
    pub result: Option<Result<YieldPrediction, String>>,
}

impl YieldForm {
    pub fn set_metadata(&mut self, metadata: YieldMetadata) {
        self.metadata = Some(metadata);
        self.metadata_error = None;
        self.state = None;
        self.district = None;
        self.season = None;
        self.crop = None;
    }

    pub fn field(&self) -> YieldField {
        YieldField::ALL[self.focus.min(YieldField::ALL.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = wrap_increment(self.focus, YieldField::ALL.len());
    }

    pub fn focus_prev(&mut self) {
        self.focus = wrap_decrement(self.focus, YieldField::ALL.len());
    }

    fn selected_state(&self) -> Option<&str> {
        let metadata = self.metadata.as_ref()?;
        metadata.states.get(self.state?).map(String::as_str)
    }

    pub fn options(&self, field: YieldField) -> &[String] {
        let Some(metadata) = &self.metadata else {
            return &[];
        };
        match field {
            YieldField::State => &metadata.states,
            YieldField::District => self
                .selected_state()
                .map(|state| metadata.districts_for(state))
                .unwrap_or_default(),
            YieldField::Season => &metadata.seasons,
            YieldField::Crop => &metadata.crops,
            YieldField::Area => &[],
        }
    }

    pub fn selection(&self, field: YieldField) -> Option<usize> {
        match field {
            YieldField::State => self.state,
            YieldField::District => self.district,
            YieldField::Season => self.season,
            YieldField::Crop => self.crop,
            YieldField::Area => None,
        }
    }

    pub fn value(&self, field: YieldField) -> &str {
        if field == YieldField::Area {
            return &self.area;
        }
        self.selection(field)
            .and_then(|index| self.options(field).get(index))
            .map_or("", String::as_str)
    }

    /// Steps the focused dropdown. Changing the state clears the district.
    pub fn cycle(&mut self, forward: bool) {
        let field = self.field();
        let len = self.options(field).len();
        if len == 0 {
            return;
        }

        let next = match (self.selection(field), forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(index), true) => wrap_increment(index, len),
            (Some(index), false) => wrap_decrement(index, len),
        };

        match field {
            YieldField::State => {
                if self.state != Some(next) {
                    self.district = None;
                }
                self.state = Some(next);
            }
            YieldField::District => self.district = Some(next),
            YieldField::Season => self.season = Some(next),
            YieldField::Crop => self.crop = Some(next),
            YieldField::Area => {}
        }
    }

    pub fn push_area(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.area.contains('.')) {
            self.area.push(c);
        }
    }

    pub fn request(&self) -> Result<YieldRequest, String> {
        for field in YieldField::ALL {
            if self.value(field).trim().is_empty() {
                return Err(format!("Please choose {}", field.label()));
            }
        }

        let area: f64 = self
            .area
            .trim()
            .parse()
            .map_err(|_| "Area must be a number".to_string())?;
        if !area.is_finite() || area <= 0.0 {
            return Err("Area must be greater than zero".to_string());
        }

        Ok(YieldRequest {
            state: self.value(YieldField::State).to_string(),
            district: self.value(YieldField::District).to_string(),
            season: self.value(YieldField::Season).to_string(),
            crop: self.value(YieldField::Crop).to_string(),
            area,
        })
    }
}
