use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    All,
    Sports,
    Fiction,
    Thriller,
    Fantasy,
}

impl Genre {
    /// Every concrete subject, in the order `All` concatenates them.
    pub const SUBJECTS: [Genre; 4] = [
        Genre::Sports,
        Genre::Fiction,
        Genre::Thriller,
        Genre::Fantasy,
    ];

    /// Every selectable genre, in the order the genre bar shows them.
    pub const MENU: [Genre; 5] = [
        Genre::All,
        Genre::Sports,
        Genre::Fiction,
        Genre::Thriller,
        Genre::Fantasy,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Genre::All => "all",
            Genre::Sports => "sports",
            Genre::Fiction => "fiction",
            Genre::Thriller => "thriller",
            Genre::Fantasy => "fantasy",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Genre::All => "All genres",
            Genre::Sports => "Sports",
            Genre::Fiction => "Fiction",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
        }
    }

    /// Subjects a catalog query has to run for this selection.
    pub fn subjects(&self) -> Vec<Genre> {
        match self {
            Genre::All => Genre::SUBJECTS.to_vec(),
            other => vec![*other],
        }
    }
}

impl Default for Genre {
    fn default() -> Self {
        Genre::Sports
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Genre::All),
            "sports" => Ok(Genre::Sports),
            "fiction" => Ok(Genre::Fiction),
            "thriller" => Ok(Genre::Thriller),
            "fantasy" => Ok(Genre::Fantasy),
            unknown => Err(anyhow::anyhow!("Unknown genre {}", unknown)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Genre;

    #[test]
    fn all_expands_in_fixed_order() {
        let expected = vec![
            Genre::Sports,
            Genre::Fiction,
            Genre::Thriller,
            Genre::Fantasy,
        ];

        assert_eq!(expected, Genre::All.subjects());
    }

    #[test]
    fn single_genre_is_its_own_subject() {
        assert_eq!(vec![Genre::Thriller], Genre::Thriller.subjects());
    }

    #[test]
    fn parse_genre() -> anyhow::Result<()> {
        assert_eq!(Genre::Fantasy, "Fantasy".parse::<Genre>()?);
        assert_eq!(Genre::All, " all ".parse::<Genre>()?);
        assert!("poetry".parse::<Genre>().is_err());

        Ok(())
    }

    #[test]
    fn defaults_to_sports() {
        assert_eq!(Genre::Sports, Genre::default());
    }
}
