//! Closed sets of language and country codes accepted by the API.
//!
//! The API silently burns quota on requests it then rejects, so both sets are
//! validated here at construction time rather than on the wire.

use std::fmt;

use crate::error::SearchError;

/// Languages accepted for the `lr` (language restrict) parameter,
/// as `(short code, encoded parameter value)`.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "lang_ar"),
    ("bg", "lang_bg"),
    ("ca", "lang_ca"),
    ("cs", "lang_cs"),
    ("da", "lang_da"),
    ("de", "lang_de"),
    ("el", "lang_el"),
    ("en", "lang_en"),
    ("es", "lang_es"),
    ("et", "lang_et"),
    ("fi", "lang_fi"),
    ("fr", "lang_fr"),
    ("hr", "lang_hr"),
    ("hu", "lang_hu"),
    ("id", "lang_id"),
    ("is", "lang_is"),
    ("it", "lang_it"),
    ("iw", "lang_iw"),
    ("ja", "lang_ja"),
    ("ko", "lang_ko"),
    ("lt", "lang_lt"),
    ("lv", "lang_lv"),
    ("nl", "lang_nl"),
    ("no", "lang_no"),
    ("pl", "lang_pl"),
    ("pt", "lang_pt"),
    ("ro", "lang_ro"),
    ("ru", "lang_ru"),
    ("sk", "lang_sk"),
    ("sl", "lang_sl"),
    ("sr", "lang_sr"),
    ("sv", "lang_sv"),
    ("tr", "lang_tr"),
    ("zh-CN", "lang_zh-CN"),
    ("zh-TW", "lang_zh-TW"),
];

/// Countries accepted for the `gl` (geolocation) parameter,
/// as `(two-letter code, English name)`.
pub const SUPPORTED_COUNTRIES: &[(&str, &str)] = &[
    ("ad", "Andorra"),
    ("ae", "United Arab Emirates"),
    ("af", "Afghanistan"),
    ("ag", "Antigua and Barbuda"),
    ("ai", "Anguilla"),
    ("al", "Albania"),
    ("am", "Armenia"),
    ("an", "Netherlands Antilles"),
    ("ao", "Angola"),
    ("aq", "Antarctica"),
    ("ar", "Argentina"),
    ("as", "American Samoa"),
    ("at", "Austria"),
    ("au", "Australia"),
    ("aw", "Aruba"),
    ("az", "Azerbaijan"),
    ("ba", "Bosnia and Herzegovina"),
    ("bb", "Barbados"),
    ("bd", "Bangladesh"),
    ("be", "Belgium"),
    ("bf", "Burkina Faso"),
    ("bg", "Bulgaria"),
    ("bh", "Bahrain"),
    ("bi", "Burundi"),
    ("bj", "Benin"),
    ("bm", "Bermuda"),
    ("bn", "Brunei Darussalam"),
    ("bo", "Bolivia"),
    ("br", "Brazil"),
    ("bs", "Bahamas"),
    ("bt", "Bhutan"),
    ("bv", "Bouvet Island"),
    ("bw", "Botswana"),
    ("by", "Belarus"),
    ("bz", "Belize"),
    ("ca", "Canada"),
    ("cc", "Cocos (Keeling) Islands"),
    ("cd", "Democratic Republic of the Congo"),
    ("cf", "Central African Republic"),
    ("cg", "Congo"),
    ("ch", "Switzerland"),
    ("ci", "Cote d'Ivoire"),
    ("ck", "Cook Islands"),
    ("cl", "Chile"),
    ("cm", "Cameroon"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("cr", "Costa Rica"),
    ("cs", "Serbia and Montenegro"),
    ("cu", "Cuba"),
    ("cv", "Cape Verde"),
    ("cx", "Christmas Island"),
    ("cy", "Cyprus"),
    ("cz", "Czech Republic"),
    ("de", "Germany"),
    ("dj", "Djibouti"),
    ("dk", "Denmark"),
    ("dm", "Dominica"),
    ("do", "Dominican Republic"),
    ("dz", "Algeria"),
    ("ec", "Ecuador"),
    ("ee", "Estonia"),
    ("eg", "Egypt"),
    ("eh", "Western Sahara"),
    ("er", "Eritrea"),
    ("es", "Spain"),
    ("et", "Ethiopia"),
    ("eu", "European Union"),
    ("fi", "Finland"),
    ("fj", "Fiji"),
    ("fk", "Falkland Islands (Malvinas)"),
    ("fm", "Micronesia"),
    ("fo", "Faroe Islands"),
    ("fr", "France"),
    ("fx", "Metropolitan France"),
    ("ga", "Gabon"),
    ("gd", "Grenada"),
    ("ge", "Georgia"),
    ("gf", "French Guiana"),
    ("gh", "Ghana"),
    ("gi", "Gibraltar"),
    ("gl", "Greenland"),
    ("gm", "Gambia"),
    ("gn", "Guinea"),
    ("gp", "Guadeloupe"),
    ("gq", "Equatorial Guinea"),
    ("gr", "Greece"),
    ("gs", "South Georgia and the South Sandwich Islands"),
    ("gt", "Guatemala"),
    ("gu", "Guam"),
    ("gw", "Guinea-Bissau"),
    ("gy", "Guyana"),
    ("hk", "Hong Kong"),
    ("hm", "Heard Island and McDonald Islands"),
    ("hn", "Honduras"),
    ("hr", "Croatia"),
    ("ht", "Haiti"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("in", "India"),
    ("io", "British Indian Ocean Territory"),
    ("iq", "Iraq"),
    ("ir", "Iran"),
    ("is", "Iceland"),
    ("it", "Italy"),
    ("jm", "Jamaica"),
    ("jo", "Jordan"),
    ("jp", "Japan"),
    ("ke", "Kenya"),
    ("kg", "Kyrgyzstan"),
    ("kh", "Cambodia"),
    ("ki", "Kiribati"),
    ("km", "Comoros"),
    ("kn", "Saint Kitts and Nevis"),
    ("kp", "North Korea"),
    ("kr", "South Korea"),
    ("kw", "Kuwait"),
    ("ky", "Cayman Islands"),
    ("kz", "Kazakhstan"),
    ("la", "Lao People's Democratic Republic"),
    ("lb", "Lebanon"),
    ("lc", "Saint Lucia"),
    ("li", "Liechtenstein"),
    ("lk", "Sri Lanka"),
    ("lr", "Liberia"),
    ("ls", "Lesotho"),
    ("lt", "Lithuania"),
    ("lu", "Luxembourg"),
    ("lv", "Latvia"),
    ("ly", "Libyan Arab Jamahiriya"),
    ("ma", "Morocco"),
    ("mc", "Monaco"),
    ("md", "Moldova"),
    ("mg", "Madagascar"),
    ("mh", "Marshall Islands"),
    ("mk", "Macedonia"),
    ("ml", "Mali"),
    ("mm", "Myanmar"),
    ("mn", "Mongolia"),
    ("mo", "Macao"),
    ("mp", "Northern Mariana Islands"),
    ("mq", "Martinique"),
    ("mr", "Mauritania"),
    ("ms", "Montserrat"),
    ("mt", "Malta"),
    ("mu", "Mauritius"),
    ("mv", "Maldives"),
    ("mw", "Malawi"),
    ("mx", "Mexico"),
    ("my", "Malaysia"),
    ("mz", "Mozambique"),
    ("na", "Namibia"),
    ("nc", "New Caledonia"),
    ("ne", "Niger"),
    ("nf", "Norfolk Island"),
    ("ng", "Nigeria"),
    ("ni", "Nicaragua"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("np", "Nepal"),
    ("nr", "Nauru"),
    ("nu", "Niue"),
    ("nz", "New Zealand"),
    ("om", "Oman"),
    ("pa", "Panama"),
    ("pe", "Peru"),
    ("pf", "French Polynesia"),
    ("pg", "Papua New Guinea"),
    ("ph", "Philippines"),
    ("pk", "Pakistan"),
    ("pl", "Poland"),
    ("pm", "Saint Pierre and Miquelon"),
    ("pn", "Pitcairn"),
    ("pr", "Puerto Rico"),
    ("ps", "Palestinian Territory"),
    ("pt", "Portugal"),
    ("pw", "Palau"),
    ("py", "Paraguay"),
    ("qa", "Qatar"),
    ("re", "Reunion"),
    ("ro", "Romania"),
    ("ru", "Russian Federation"),
    ("rw", "Rwanda"),
    ("sa", "Saudi Arabia"),
    ("sb", "Solomon Islands"),
    ("sc", "Seychelles"),
    ("sd", "Sudan"),
    ("se", "Sweden"),
    ("sg", "Singapore"),
    ("sh", "Saint Helena"),
    ("si", "Slovenia"),
    ("sj", "Svalbard and Jan Mayen"),
    ("sk", "Slovakia"),
    ("sl", "Sierra Leone"),
    ("sm", "San Marino"),
    ("sn", "Senegal"),
    ("so", "Somalia"),
    ("sr", "Suriname"),
    ("st", "Sao Tome and Principe"),
    ("sv", "El Salvador"),
    ("sy", "Syrian Arab Republic"),
    ("sz", "Swaziland"),
    ("tc", "Turks and Caicos Islands"),
    ("td", "Chad"),
    ("tf", "French Southern Territories"),
    ("tg", "Togo"),
    ("th", "Thailand"),
    ("tj", "Tajikistan"),
    ("tk", "Tokelau"),
    ("tm", "Turkmenistan"),
    ("tn", "Tunisia"),
    ("to", "Tonga"),
    ("tp", "East Timor"),
    ("tr", "Turkey"),
    ("tt", "Trinidad and Tobago"),
    ("tv", "Tuvalu"),
    ("tw", "Taiwan"),
    ("tz", "Tanzania"),
    ("ua", "Ukraine"),
    ("ug", "Uganda"),
    ("uk", "United Kingdom"),
    ("um", "United States Minor Outlying Islands"),
    ("us", "United States"),
    ("uy", "Uruguay"),
    ("uz", "Uzbekistan"),
    ("va", "Holy See (Vatican City State)"),
    ("vc", "Saint Vincent and the Grenadines"),
    ("ve", "Venezuela"),
    ("vg", "British Virgin Islands"),
    ("vi", "U.S. Virgin Islands"),
    ("vn", "Vietnam"),
    ("vu", "Vanuatu"),
    ("wf", "Wallis and Futuna"),
    ("ws", "Samoa"),
    ("ye", "Yemen"),
    ("yt", "Mayotte"),
    ("yu", "Yugoslavia"),
    ("za", "South Africa"),
    ("zm", "Zambia"),
    ("zw", "Zimbabwe"),
];

/// A validated language restriction for the `lr` parameter.
///
/// Constructed from a short code such as `"en"` or `"zh-CN"`; anything
/// outside [`SUPPORTED_LANGUAGES`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
    param: &'static str,
}

impl Language {
    /// Look up a language by its short code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, SearchError> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|&(code, param)| Self { code, param })
            .ok_or_else(|| {
                SearchError::Configuration(format!("unsupported language code: {code:?}"))
            })
    }

    /// Look up a language by its encoded `lr` value, e.g. `"lang_en"`.
    pub fn from_param(param: &str) -> Result<Self, SearchError> {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(_, p)| *p == param)
            .map(|&(code, param)| Self { code, param })
            .ok_or_else(|| {
                SearchError::Configuration(format!("unsupported language parameter: {param:?}"))
            })
    }

    /// The short code, e.g. `"en"`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The encoded `lr` parameter value, e.g. `"lang_en"`.
    pub fn as_param(&self) -> &'static str {
        self.param
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// A validated country restriction for the `gl` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Country {
    code: &'static str,
    name: &'static str,
}

impl Country {
    /// Look up a country by its two-letter code (case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, SearchError> {
        SUPPORTED_COUNTRIES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|&(code, name)| Self { code, name })
            .ok_or_else(|| {
                SearchError::Configuration(format!("unsupported country code: {code:?}"))
            })
    }

    /// The two-letter code, e.g. `"us"`.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The English name, e.g. `"United States"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The encoded `gl` parameter value (identical to the code).
    pub fn as_param(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
