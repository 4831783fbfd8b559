//! States and districts offered by the sign-up picker.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

const REGIONS: &[(&str, &[&str])] = &[
    ("Andhra Pradesh", &["Anantapur", "Chittoor", "East Godavari", "Guntur", "Krishna", "Kurnool", "Nellore", "Visakhapatnam", "West Godavari"]),
    ("Assam", &["Barpeta", "Cachar", "Dibrugarh", "Jorhat", "Kamrup", "Nagaon", "Sonitpur", "Tinsukia"]),
    ("Bihar", &["Bhagalpur", "Darbhanga", "Gaya", "Muzaffarpur", "Nalanda", "Patna", "Purnia", "Samastipur", "Vaishali"]),
    ("Chhattisgarh", &["Bastar", "Bilaspur", "Durg", "Raigarh", "Raipur", "Rajnandgaon"]),
    ("Goa", &["North Goa", "South Goa"]),
    ("Gujarat", &["Ahmedabad", "Amreli", "Anand", "Banaskantha", "Bhavnagar", "Junagadh", "Kutch", "Mehsana", "Rajkot", "Surat", "Vadodara"]),
    ("Haryana", &["Ambala", "Bhiwani", "Hisar", "Jind", "Kaithal", "Karnal", "Kurukshetra", "Panipat", "Rohtak", "Sirsa", "Sonipat"]),
    ("Himachal Pradesh", &["Chamba", "Hamirpur", "Kangra", "Kullu", "Mandi", "Shimla", "Solan", "Una"]),
    ("Jharkhand", &["Bokaro", "Deoghar", "Dhanbad", "Dumka", "Hazaribagh", "Palamu", "Ranchi"]),
    ("Karnataka", &["Ballari", "Belagavi", "Bengaluru Rural", "Davanagere", "Dharwad", "Hassan", "Kalaburagi", "Mandya", "Mysuru", "Raichur", "Shivamogga", "Tumakuru"]),
    ("Kerala", &["Alappuzha", "Ernakulam", "Idukki", "Kozhikode", "Palakkad", "Thrissur", "Wayanad"]),
    ("Madhya Pradesh", &["Bhopal", "Chhindwara", "Dewas", "Gwalior", "Hoshangabad", "Indore", "Jabalpur", "Sagar", "Satna", "Ujjain", "Vidisha"]),
    ("Maharashtra", &["Ahmednagar", "Akola", "Amravati", "Aurangabad", "Jalgaon", "Kolhapur", "Latur", "Nagpur", "Nanded", "Nashik", "Pune", "Sangli", "Satara", "Solapur", "Yavatmal"]),
    ("Odisha", &["Balasore", "Bargarh", "Cuttack", "Ganjam", "Kalahandi", "Koraput", "Puri", "Sambalpur"]),
    ("Punjab", &["Amritsar", "Bathinda", "Firozpur", "Gurdaspur", "Hoshiarpur", "Jalandhar", "Ludhiana", "Moga", "Patiala", "Sangrur"]),
    ("Rajasthan", &["Ajmer", "Alwar", "Barmer", "Bharatpur", "Bikaner", "Jaipur", "Jodhpur", "Kota", "Nagaur", "Sri Ganganagar", "Udaipur"]),
    ("Tamil Nadu", &["Coimbatore", "Erode", "Madurai", "Salem", "Thanjavur", "Tiruchirappalli", "Tirunelveli", "Vellore"]),
    ("Telangana", &["Adilabad", "Karimnagar", "Khammam", "Nalgonda", "Nizamabad", "Ranga Reddy", "Warangal Urban"]),
    ("Uttar Pradesh", &["Agra", "Aligarh", "Bareilly", "Gorakhpur", "Jhansi", "Kanpur Nagar", "Lucknow", "Meerut", "Moradabad", "Prayagraj", "Saharanpur", "Varanasi"]),
    ("Uttarakhand", &["Almora", "Dehradun", "Haridwar", "Nainital", "Udham Singh Nagar"]),
    ("West Bengal", &["Bankura", "Birbhum", "Burdwan", "Hooghly", "Jalpaiguri", "Malda", "Murshidabad", "Nadia", "Purulia"]),
];

pub fn states() -> Vec<&'static str> {
    REGIONS.iter().map(|(state, _)| *state).collect()
}

/// Districts of `state`, empty for an unknown state.
pub fn districts(state: &str) -> &'static [&'static str] {
    REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(state.trim()))
        .map(|(_, districts)| *districts)
        .unwrap_or_default()
}

/// Ranks `choices` against a typed query, best match first.
///
/// A blank query keeps the original order.
pub fn fuzzy_filter<'a>(choices: &[&'a str], query: &str) -> Vec<&'a str> {
    let query = query.trim();
    if query.is_empty() {
        return choices.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &'a str)> = choices
        .iter()
        .filter_map(|choice| {
            matcher
                .fuzzy_match(choice, query)
                .map(|score| (score, *choice))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.into_iter().map(|(_, choice)| choice).collect()
}
