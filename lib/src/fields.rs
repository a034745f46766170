//! The file version fields that can be reported.

use super::*;
use std::str::FromStr;

/// The fields reported when none are selected.
pub const DEFAULT_FIELDS: &str = "name,size,mtime,backup";

/// A reportable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The file path.
    Name,
    /// The file size in bytes.
    Size,
    /// The modification time in the cluster timezone.
    Mtime,
    /// When the snapshot holding the version was taken, in the cluster timezone.
    Backup,
    /// The file mode string.
    Type,
    /// `Archive` or `Local`.
    Location,
}
impl Field {
    /// All of the fields.
    pub const ALL: [Field; 6] = [Field::Name, Field::Size, Field::Mtime, Field::Backup, Field::Type, Field::Location];
    /// The field name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Size => "size",
            Field::Mtime => "mtime",
            Field::Backup => "backup",
            Field::Type => "type",
            Field::Location => "location",
        }
    }
    /// Returns `true` if the field needs the snapshot to be looked up.
    pub fn needs_snapshot(&self) -> bool {
        matches!(self, Field::Backup)
    }
}
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Field {
    type Err = String;
    fn from_str(name: &str) -> result::Result<Self, Self::Err> {
        Field::ALL.into_iter().find(|field| field.name() == name).ok_or_else(|| format!("Invalid field: {name}"))
    }
}

/// The outcome of validating a field list.
#[derive(Debug, Default, PartialEq)]
pub struct FieldSelection {
    /// The recognized fields in the order they were given.
    pub fields: Vec<Field>,
    /// The names that were not recognized.
    pub rejected: Vec<String>,
}

/// Validate a comma separated list of field names.
///
/// Unrecognized names are left out of the selected fields and collected so they can be
/// reported.
///
/// # Arguments
///
/// * `field_list` is the comma separated list of field names.
pub fn validate_fields(field_list: &str) -> FieldSelection {
    let mut selection = FieldSelection::default();
    for name in field_list.split(',') {
        match name.parse::<Field>() {
            Ok(field) => selection.fields.push(field),
            Err(_) => selection.rejected.push(name.to_string()),
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let selection = validate_fields(DEFAULT_FIELDS);
        assert_eq!(selection.fields, vec![Field::Name, Field::Size, Field::Mtime, Field::Backup]);
        assert!(selection.rejected.is_empty());
    }

    #[test]
    fn rejected() {
        let selection = validate_fields("name,bogus,junk,size,Type,location");
        assert_eq!(selection.fields, vec![Field::Name, Field::Size, Field::Location]);
        assert_eq!(selection.rejected, vec!["bogus", "junk", "Type"]);
        // adjacent bad names are both dropped
        let selection = validate_fields("x,y");
        assert!(selection.fields.is_empty());
        assert_eq!(selection.rejected, vec!["x", "y"]);
        let selection = validate_fields("");
        assert!(selection.fields.is_empty());
        assert_eq!(selection.rejected, vec![""]);
    }

    #[test]
    fn order() {
        let selection = validate_fields("location,type,backup,mtime,size,name,name");
        assert_eq!(
            selection.fields,
            vec![Field::Location, Field::Type, Field::Backup, Field::Mtime, Field::Size, Field::Name, Field::Name]
        );
    }

    #[test]
    fn names() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
            assert_eq!(field.to_string(), field.name());
        }
        assert_eq!("size ".parse::<Field>().unwrap_err(), "Invalid field: size ");
        assert!(Field::Backup.needs_snapshot());
        assert!(!Field::Mtime.needs_snapshot());
    }
}
