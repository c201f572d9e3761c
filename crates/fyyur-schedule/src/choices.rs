//! Fixed enumerations offered on the venue and artist forms.

use serde::Serialize;

/// A (code, label) pair as offered to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub code: &'static str,
    pub label: &'static str,
}

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }

            pub fn choices() -> Vec<Choice> {
                Self::ALL
                    .iter()
                    .map(|v| Choice {
                        code: v.code(),
                        label: v.label(),
                    })
                    .collect()
            }
        }
    };
}

choice_enum!(
    /// Musical genres a venue hosts or an artist plays.
    Genre {
        Alternative => ("Alternative", "Alternative"),
        Blues => ("Blues", "Blues"),
        Classical => ("Classical", "Classical"),
        Country => ("Country", "Country"),
        Electronic => ("Electronic", "Electronic"),
        Folk => ("Folk", "Folk"),
        Funk => ("Funk", "Funk"),
        HipHop => ("Hip_Hop", "Hip-Hop"),
        HeavyMetal => ("Heavy_Metal", "Heavy Metal"),
        Instrumental => ("Instrumental", "Instrumental"),
        Jazz => ("Jazz", "Jazz"),
        MusicalTheatre => ("Musical_Theatre", "Musical Theatre"),
        Pop => ("Pop", "Pop"),
        Punk => ("Punk", "Punk"),
        RnB => ("RnB", "R&B"),
        Reggae => ("Reggae", "Reggae"),
        RockNRoll => ("Rock_n_Roll", "Rock n Roll"),
        Soul => ("Soul", "Soul"),
        Other => ("Other", "Other"),
    }
);

choice_enum!(
    /// US states plus DC.
    State {
        AL => ("AL", "AL"), AK => ("AK", "AK"), AZ => ("AZ", "AZ"), AR => ("AR", "AR"),
        CA => ("CA", "CA"), CO => ("CO", "CO"), CT => ("CT", "CT"), DE => ("DE", "DE"),
        DC => ("DC", "DC"), FL => ("FL", "FL"), GA => ("GA", "GA"), HI => ("HI", "HI"),
        ID => ("ID", "ID"), IL => ("IL", "IL"), IN => ("IN", "IN"), IA => ("IA", "IA"),
        KS => ("KS", "KS"), KY => ("KY", "KY"), LA => ("LA", "LA"), ME => ("ME", "ME"),
        MT => ("MT", "MT"), NE => ("NE", "NE"), NV => ("NV", "NV"), NH => ("NH", "NH"),
        NJ => ("NJ", "NJ"), NM => ("NM", "NM"), NY => ("NY", "NY"), NC => ("NC", "NC"),
        ND => ("ND", "ND"), OH => ("OH", "OH"), OK => ("OK", "OK"), OR => ("OR", "OR"),
        MD => ("MD", "MD"), MA => ("MA", "MA"), MI => ("MI", "MI"), MN => ("MN", "MN"),
        MS => ("MS", "MS"), MO => ("MO", "MO"), PA => ("PA", "PA"), RI => ("RI", "RI"),
        SC => ("SC", "SC"), SD => ("SD", "SD"), TN => ("TN", "TN"), TX => ("TX", "TX"),
        UT => ("UT", "UT"), VT => ("VT", "VT"), VA => ("VA", "VA"), WA => ("WA", "WA"),
        WV => ("WV", "WV"), WI => ("WI", "WI"), WY => ("WY", "WY"),
    }
);

/// Genre codes as stored in the `genres` column.
pub fn join_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a stored `genres` column. Unknown codes are logged and dropped.
pub fn split_genres(column: &str) -> Vec<Genre> {
    column
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .filter_map(|code| {
            let genre = Genre::from_code(code);
            if genre.is_none() {
                tracing::warn!(code, "unknown genre code in stored record");
            }
            genre
        })
        .collect()
}

/// Display labels for a stored `genres` column.
pub fn genre_labels(column: &str) -> Vec<String> {
    split_genres(column)
        .into_iter()
        .map(|g| g.label().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_genre_choices_cover_every_variant() {
        let choices = Genre::choices();
        assert_eq!(choices.len(), 19);
        assert_eq!(choices[0], Choice { code: "Alternative", label: "Alternative" });
        assert!(choices.contains(&Choice { code: "RnB", label: "R&B" }));
        assert!(choices.contains(&Choice { code: "Hip_Hop", label: "Hip-Hop" }));
    }

    #[test]
    fn test_state_choices() {
        let choices = State::choices();
        assert_eq!(choices.len(), 51);
        let codes: HashSet<_> = choices.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), 51);
        assert!(codes.contains("DC"));
    }

    #[test]
    fn test_from_code_is_a_membership_check() {
        assert_eq!(State::from_code("CA"), Some(State::CA));
        assert_eq!(State::from_code("ca"), None);
        assert_eq!(State::from_code("XX"), None);
        assert_eq!(Genre::from_code("Rock_n_Roll"), Some(Genre::RockNRoll));
        // Labels are not codes.
        assert_eq!(Genre::from_code("Rock n Roll"), None);
    }

    #[test]
    fn test_genres_column_round_trip() {
        let genres = [Genre::Jazz, Genre::RnB, Genre::HipHop];
        let column = join_genres(&genres);
        assert_eq!(column, "Jazz, RnB, Hip_Hop");
        assert_eq!(split_genres(&column), genres);
    }

    #[test]
    fn test_split_genres_drops_unknown_codes() {
        assert_eq!(split_genres("Jazz, Polka,,Folk"), vec![Genre::Jazz, Genre::Folk]);
        assert!(split_genres("").is_empty());
    }

    #[test]
    fn test_genre_labels() {
        assert_eq!(
            genre_labels("Musical_Theatre, Heavy_Metal"),
            vec!["Musical Theatre".to_string(), "Heavy Metal".to_string()]
        );
    }
}
