//! Per-sheet row validation and normalization.
//!
//! Column alias tables are data: each logical field lists the header
//! variants seen in real uploads, including long-lived typos
//! ("copmetency", "perquisites"). Matching itself lives in `columns`.

use time::Date;

use super::columns::resolve;
use super::source::{excel_serial_to_date, Cell, Table};

/// Default trainer when the sheet leaves the column blank.
pub(crate) const NOT_ASSIGNED: &str = "Not Assigned";

const TRUTHY: &[&str] = &["t", "true", "1", "yes", "y"];

// Trainers Details
const SKILL: &[&str] = &["skill", "skills"];
const COMPETENCY: &[&str] = &["competency", "competence"];
const TRAINER_NAME: &[&str] = &["trainer_name", "trainername", "trainer", "copmetency", "name"];
const EXPERTISE_LEVEL: &[&str] = &["expertise_level", "expertiselevel", "expertise", "level"];

// Training Details
const TRAINING_NAME: &[&str] =
    &["trainingname_program", "training_name", "trainingname", "program", "training"];
const DIVISION: &[&str] = &["division"];
const DEPARTMENT: &[&str] = &["department"];
const TRAINING_TOPICS: &[&str] = &["trainingtopics__material", "training_topics", "topics"];
const PREREQUISITES: &[&str] = &["perquisites", "prerequisites", "pre_requisites"];
const SKILL_CATEGORY: &[&str] = &["skill_category_(l1_-_l5)", "skill_category"];
const EMAIL: &[&str] = &["email_id", "email"];
const TRAINING_DATE: &[&str] = &["training_dates", "training_date"];
const DURATION: &[&str] = &["duration_(in_hrs)", "duration"];
// Guard and value read the same column; historic ingest code checked a
// mistyped key here and silently dropped every seats value.
const SEATS: &[&str] = &["no._of_seats", "no_of_seats", "number_of_seats", "seats"];
const TIME_SLOT: &[&str] = &["time_slot", "time", "timing"];
const TRAINING_TYPE: &[&str] = &["training_type", "type"];
const ASSESSMENT_DETAILS: &[&str] = &["assessment_details", "assessment"];

// Manager/employee CSV
const MANAGER_EMPID: &[&str] = &["manager_empid"];
const MANAGER_NAME: &[&str] = &["manager_name"];
const EMPLOYEE_EMPID_CSV: &[&str] = &["employee_empid"];
const EMPLOYEE_NAME_CSV: &[&str] = &["employee_name"];
const MANAGER_IS_TRAINER: &[&str] = &["manager_is_trainer"];
const EMPLOYEE_IS_TRAINER: &[&str] = &["employee_is_trainer"];

// Employee Competency
const EMPLOYEE_EMPID: &[&str] = &["employee_id", "employeeid", "empid", "employee_empid"];
const EMPLOYEE_NAME: &[&str] = &["employee_name", "employeename", "name"];
const PROJECT: &[&str] = &["project"];
const ROLE_SPECIFIC_COMP: &[&str] =
    &["role_specific_competency_(mhs)", "role_specific_competency", "role_specific_comp"];
const DESIGNATION: &[&str] = &["designation", "destination", "desination"];
const CURRENT_EXPERTISE: &[&str] = &["current_expertise_level", "current_expertise"];
const TARGET_EXPERTISE: &[&str] = &["target_expertise_level", "target_expertise"];
const COMMENTS: &[&str] = &["comments", "comment"];
const TARGET_DATE: &[&str] = &["target_date"];

#[derive(Debug)]
pub(crate) struct RowError {
    pub(crate) row: usize,
    pub(crate) missing: Vec<&'static str>,
}

/// Trimmed text, or None for anything blank. Numbers with a zero fraction
/// render as integer text so empids like 5504763.0 come out as "5504763".
pub(crate) fn text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Text(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Cell::Number(value) => {
            if value.fract() == 0.0 && value.abs() < 9.0e15 {
                Some(format!("{}", *value as i64))
            } else {
                Some(value.to_string())
            }
        }
        Cell::Bool(value) => Some(value.to_string()),
        Cell::Date(value) => Some(crate::core::time::format_date(*value)),
    }
}

/// Dates may arrive native, as Excel serial numbers, or as text in a handful
/// of formats. Anything unparseable is dropped, never an error.
pub(crate) fn date(cell: &Cell) -> Option<Date> {
    match cell {
        Cell::Date(value) => Some(*value),
        Cell::Number(value) => excel_serial_to_date(*value),
        Cell::Text(value) => parse_date_text(value),
        _ => None,
    }
}

pub(crate) fn boolean(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(value) => *value,
        Cell::Text(value) => TRUTHY.contains(&value.trim().to_lowercase().as_str()),
        Cell::Number(value) => *value == 1.0,
        _ => false,
    }
}

fn parse_date_text(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // RFC3339 / ISO datetime: keep the date part
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);

    let parts: Vec<&str> = date_part.split(['-', '/']).collect();
    if parts.len() != 3 {
        return None;
    }

    let (year, month, day) = if parts[0].len() == 4 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let day: u8 = day.parse().ok()?;

    let month = time::Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

pub(crate) struct TrainerColumns {
    skill: Option<usize>,
    competency: Option<usize>,
    trainer_name: Option<usize>,
    expertise_level: Option<usize>,
}

impl TrainerColumns {
    pub(crate) fn locate(headers: &[String]) -> Self {
        Self {
            skill: resolve(headers, SKILL),
            competency: resolve(headers, COMPETENCY),
            trainer_name: resolve(headers, TRAINER_NAME),
            expertise_level: resolve(headers, EXPERTISE_LEVEL),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct TrainerRow {
    pub(crate) skill: String,
    pub(crate) competency: String,
    pub(crate) trainer_name: String,
    pub(crate) expertise_level: String,
}

pub(crate) fn trainer_row(
    columns: &TrainerColumns,
    table: &Table,
    row: &[Cell],
    row_number: usize,
) -> Result<TrainerRow, RowError> {
    let value = |index: Option<usize>| index.and_then(|idx| text(table.cell(row, idx)));

    let skill = value(columns.skill);
    let competency = value(columns.competency);
    let expertise_level = value(columns.expertise_level);
    let trainer_name =
        value(columns.trainer_name).unwrap_or_else(|| NOT_ASSIGNED.to_string());

    let mut missing = Vec::new();
    if skill.is_none() {
        missing.push("skill");
    }
    if competency.is_none() {
        missing.push("competency");
    }
    if expertise_level.is_none() {
        missing.push("expertise_level");
    }
    if !missing.is_empty() {
        return Err(RowError { row: row_number, missing });
    }

    Ok(TrainerRow {
        skill: skill.unwrap_or_default(),
        competency: competency.unwrap_or_default(),
        trainer_name,
        expertise_level: expertise_level.unwrap_or_default(),
    })
}

pub(crate) struct TrainingColumns {
    division: Option<usize>,
    department: Option<usize>,
    competency: Option<usize>,
    skill: Option<usize>,
    training_name: Option<usize>,
    training_topics: Option<usize>,
    prerequisites: Option<usize>,
    skill_category: Option<usize>,
    trainer_name: Option<usize>,
    email: Option<usize>,
    training_date: Option<usize>,
    duration: Option<usize>,
    time_slot: Option<usize>,
    training_type: Option<usize>,
    seats: Option<usize>,
    assessment_details: Option<usize>,
}

impl TrainingColumns {
    pub(crate) fn locate(headers: &[String]) -> Self {
        Self {
            division: resolve(headers, DIVISION),
            department: resolve(headers, DEPARTMENT),
            competency: resolve(headers, COMPETENCY),
            skill: resolve(headers, SKILL),
            training_name: resolve(headers, TRAINING_NAME),
            training_topics: resolve(headers, TRAINING_TOPICS),
            prerequisites: resolve(headers, PREREQUISITES),
            skill_category: resolve(headers, SKILL_CATEGORY),
            trainer_name: resolve(headers, TRAINER_NAME),
            email: resolve(headers, EMAIL),
            training_date: resolve(headers, TRAINING_DATE),
            duration: resolve(headers, DURATION),
            time_slot: resolve(headers, TIME_SLOT),
            training_type: resolve(headers, TRAINING_TYPE),
            seats: resolve(headers, SEATS),
            assessment_details: resolve(headers, ASSESSMENT_DETAILS),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct TrainingRow {
    pub(crate) division: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) competency: Option<String>,
    pub(crate) skill: Option<String>,
    pub(crate) training_name: String,
    pub(crate) training_topics: Option<String>,
    pub(crate) prerequisites: Option<String>,
    pub(crate) skill_category: Option<String>,
    pub(crate) trainer_name: String,
    pub(crate) email: Option<String>,
    pub(crate) training_date: Option<Date>,
    pub(crate) duration: Option<String>,
    pub(crate) time_slot: Option<String>,
    pub(crate) training_type: Option<String>,
    pub(crate) seats: Option<String>,
    pub(crate) assessment_details: Option<String>,
}

pub(crate) fn training_row(
    columns: &TrainingColumns,
    table: &Table,
    row: &[Cell],
    row_number: usize,
) -> Result<TrainingRow, RowError> {
    let value = |index: Option<usize>| index.and_then(|idx| text(table.cell(row, idx)));

    let Some(training_name) = value(columns.training_name) else {
        return Err(RowError { row: row_number, missing: vec!["training_name"] });
    };
    let trainer_name =
        value(columns.trainer_name).unwrap_or_else(|| NOT_ASSIGNED.to_string());

    Ok(TrainingRow {
        division: value(columns.division),
        department: value(columns.department),
        competency: value(columns.competency),
        skill: value(columns.skill),
        training_name,
        training_topics: value(columns.training_topics),
        prerequisites: value(columns.prerequisites),
        skill_category: value(columns.skill_category),
        trainer_name,
        email: value(columns.email),
        training_date: columns.training_date.and_then(|idx| date(table.cell(row, idx))),
        duration: value(columns.duration),
        time_slot: value(columns.time_slot),
        training_type: value(columns.training_type),
        seats: value(columns.seats),
        assessment_details: value(columns.assessment_details),
    })
}

pub(crate) struct RelationshipColumns {
    pub(crate) manager_empid: Option<usize>,
    pub(crate) manager_name: Option<usize>,
    pub(crate) employee_empid: Option<usize>,
    pub(crate) employee_name: Option<usize>,
    manager_is_trainer: Option<usize>,
    employee_is_trainer: Option<usize>,
}

impl RelationshipColumns {
    pub(crate) fn locate(headers: &[String]) -> Self {
        Self {
            manager_empid: resolve(headers, MANAGER_EMPID),
            manager_name: resolve(headers, MANAGER_NAME),
            employee_empid: resolve(headers, EMPLOYEE_EMPID_CSV),
            employee_name: resolve(headers, EMPLOYEE_NAME_CSV),
            manager_is_trainer: resolve(headers, MANAGER_IS_TRAINER),
            employee_is_trainer: resolve(headers, EMPLOYEE_IS_TRAINER),
        }
    }

    /// The CSV contract requires all four identity columns.
    pub(crate) fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.manager_empid.is_none() {
            missing.push("manager_empid");
        }
        if self.manager_name.is_none() {
            missing.push("manager_name");
        }
        if self.employee_empid.is_none() {
            missing.push("employee_empid");
        }
        if self.employee_name.is_none() {
            missing.push("employee_name");
        }
        missing
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct RelationshipRow {
    pub(crate) manager_empid: String,
    pub(crate) employee_empid: String,
    pub(crate) manager_name: Option<String>,
    pub(crate) employee_name: Option<String>,
    pub(crate) manager_is_trainer: bool,
    pub(crate) employee_is_trainer: bool,
}

pub(crate) fn relationship_row(
    columns: &RelationshipColumns,
    table: &Table,
    row: &[Cell],
    row_number: usize,
) -> Result<RelationshipRow, RowError> {
    let value = |index: Option<usize>| index.and_then(|idx| text(table.cell(row, idx)));
    let flag = |index: Option<usize>| {
        index.map(|idx| boolean(table.cell(row, idx))).unwrap_or(false)
    };

    let manager_empid = value(columns.manager_empid);
    let employee_empid = value(columns.employee_empid);

    let mut missing = Vec::new();
    if manager_empid.is_none() {
        missing.push("manager_empid");
    }
    if employee_empid.is_none() {
        missing.push("employee_empid");
    }
    if !missing.is_empty() {
        return Err(RowError { row: row_number, missing });
    }

    Ok(RelationshipRow {
        manager_empid: manager_empid.unwrap_or_default(),
        employee_empid: employee_empid.unwrap_or_default(),
        manager_name: value(columns.manager_name),
        employee_name: value(columns.employee_name),
        manager_is_trainer: flag(columns.manager_is_trainer),
        employee_is_trainer: flag(columns.employee_is_trainer),
    })
}

pub(crate) struct CompetencyColumns {
    employee_empid: Option<usize>,
    employee_name: Option<usize>,
    department: Option<usize>,
    division: Option<usize>,
    project: Option<usize>,
    role_specific_comp: Option<usize>,
    designation: Option<usize>,
    competency: Option<usize>,
    skill: Option<usize>,
    current_expertise: Option<usize>,
    target_expertise: Option<usize>,
    comments: Option<usize>,
    target_date: Option<usize>,
}

impl CompetencyColumns {
    pub(crate) fn locate(headers: &[String]) -> Self {
        Self {
            employee_empid: resolve(headers, EMPLOYEE_EMPID),
            employee_name: resolve(headers, EMPLOYEE_NAME),
            department: resolve(headers, DEPARTMENT),
            division: resolve(headers, DIVISION),
            project: resolve(headers, PROJECT),
            role_specific_comp: resolve(headers, ROLE_SPECIFIC_COMP),
            designation: resolve(headers, DESIGNATION),
            competency: resolve(headers, COMPETENCY),
            skill: resolve(headers, SKILL),
            current_expertise: resolve(headers, CURRENT_EXPERTISE),
            target_expertise: resolve(headers, TARGET_EXPERTISE),
            comments: resolve(headers, COMMENTS),
            target_date: resolve(headers, TARGET_DATE),
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct CompetencyRow {
    pub(crate) employee_empid: String,
    pub(crate) employee_name: Option<String>,
    pub(crate) department: Option<String>,
    pub(crate) division: Option<String>,
    pub(crate) project: Option<String>,
    pub(crate) role_specific_comp: Option<String>,
    pub(crate) designation: Option<String>,
    pub(crate) competency: Option<String>,
    pub(crate) skill: Option<String>,
    pub(crate) current_expertise: Option<String>,
    pub(crate) target_expertise: Option<String>,
    pub(crate) comments: Option<String>,
    pub(crate) target_date: Option<Date>,
}

pub(crate) fn competency_row(
    columns: &CompetencyColumns,
    table: &Table,
    row: &[Cell],
    row_number: usize,
) -> Result<CompetencyRow, RowError> {
    let value = |index: Option<usize>| index.and_then(|idx| text(table.cell(row, idx)));

    let Some(employee_empid) = value(columns.employee_empid) else {
        return Err(RowError { row: row_number, missing: vec!["employee_empid"] });
    };

    Ok(CompetencyRow {
        employee_empid,
        employee_name: value(columns.employee_name),
        department: value(columns.department),
        division: value(columns.division),
        project: value(columns.project),
        role_specific_comp: value(columns.role_specific_comp),
        designation: value(columns.designation),
        competency: value(columns.competency),
        skill: value(columns.skill),
        current_expertise: value(columns.current_expertise),
        target_expertise: value(columns.target_expertise),
        comments: value(columns.comments),
        target_date: columns.target_date.and_then(|idx| date(table.cell(row, idx))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: Vec<Vec<Cell>>) -> Table {
        Table { headers: headers.iter().map(|h| h.to_string()).collect(), rows }
    }

    #[test]
    fn text_renders_integral_floats_as_integers() {
        assert_eq!(text(&Cell::Number(5504763.0)), Some("5504763".to_string()));
        assert_eq!(text(&Cell::Number(2.5)), Some("2.5".to_string()));
    }

    #[test]
    fn text_trims_and_drops_blank() {
        assert_eq!(text(&Cell::Text("  hello ".to_string())), Some("hello".to_string()));
        assert_eq!(text(&Cell::Text("   ".to_string())), None);
        assert_eq!(text(&Cell::Empty), None);
    }

    #[test]
    fn boolean_accepts_truthy_tokens() {
        for token in ["t", "TRUE", "1", "Yes", "y"] {
            assert!(boolean(&Cell::Text(token.to_string())), "{token} should be truthy");
        }
        assert!(!boolean(&Cell::Text("no".to_string())));
        assert!(!boolean(&Cell::Text("f".to_string())));
        assert!(!boolean(&Cell::Empty));
        assert!(boolean(&Cell::Bool(true)));
    }

    #[test]
    fn date_parses_common_text_formats() {
        let expected =
            Date::from_calendar_date(2024, time::Month::March, 15).unwrap();
        assert_eq!(date(&Cell::Text("2024-03-15".to_string())), Some(expected));
        assert_eq!(date(&Cell::Text("15-03-2024".to_string())), Some(expected));
        assert_eq!(date(&Cell::Text("15/03/2024".to_string())), Some(expected));
        assert_eq!(date(&Cell::Text("2024-03-15T10:30:00Z".to_string())), Some(expected));
        assert_eq!(date(&Cell::Text("not a date".to_string())), None);
    }

    #[test]
    fn trainer_row_defaults_missing_trainer_name() {
        let table = table(
            &["skill", "competency", "expertise_level"],
            vec![vec![
                Cell::Text("Rust".to_string()),
                Cell::Text("Backend".to_string()),
                Cell::Text("L3".to_string()),
            ]],
        );
        let columns = TrainerColumns::locate(&table.headers);

        let row = trainer_row(&columns, &table, &table.rows[0], 2).expect("row");
        assert_eq!(row.trainer_name, NOT_ASSIGNED);
        assert_eq!(row.skill, "Rust");
    }

    #[test]
    fn trainer_row_reports_missing_required_fields() {
        let table = table(
            &["skill", "competency", "expertise_level"],
            vec![vec![Cell::Text("Rust".to_string()), Cell::Empty, Cell::Empty]],
        );
        let columns = TrainerColumns::locate(&table.headers);

        let err = trainer_row(&columns, &table, &table.rows[0], 2).unwrap_err();
        assert_eq!(err.row, 2);
        assert_eq!(err.missing, vec!["competency", "expertise_level"]);
    }

    #[test]
    fn training_row_requires_only_training_name() {
        let table = table(
            &["trainingname_program", "trainer_name", "no._of_seats", "training_dates"],
            vec![vec![
                Cell::Text("Ownership Deep Dive".to_string()),
                Cell::Empty,
                Cell::Number(25.0),
                Cell::Text("2024-05-01".to_string()),
            ]],
        );
        let columns = TrainingColumns::locate(&table.headers);

        let row = training_row(&columns, &table, &table.rows[0], 2).expect("row");
        assert_eq!(row.training_name, "Ownership Deep Dive");
        assert_eq!(row.trainer_name, NOT_ASSIGNED);
        assert_eq!(row.seats, Some("25".to_string()));
        assert_eq!(
            row.training_date,
            Some(Date::from_calendar_date(2024, time::Month::May, 1).unwrap())
        );
    }

    #[test]
    fn generic_name_alias_claims_training_column_when_no_trainer_header() {
        // Without a trainer column the catch-all "name" alias substring-matches
        // "trainingname_program", so the trainer field picks up the training
        // name instead of the sentinel.
        let table = table(
            &["trainingname_program"],
            vec![vec![Cell::Text("Ownership Deep Dive".to_string())]],
        );
        let columns = TrainingColumns::locate(&table.headers);

        let row = training_row(&columns, &table, &table.rows[0], 2).expect("row");
        assert_eq!(row.trainer_name, "Ownership Deep Dive");
    }

    #[test]
    fn relationship_row_parses_trainer_flags() {
        let table = table(
            &[
                "manager_empid",
                "manager_name",
                "employee_empid",
                "employee_name",
                "manager_is_trainer",
                "employee_is_trainer",
            ],
            vec![vec![
                Cell::Text("1001".to_string()),
                Cell::Text("Alice".to_string()),
                Cell::Text("2001".to_string()),
                Cell::Text("Bob".to_string()),
                Cell::Text("yes".to_string()),
                Cell::Text("f".to_string()),
            ]],
        );
        let columns = RelationshipColumns::locate(&table.headers);
        assert!(columns.missing_required().is_empty());

        let row = relationship_row(&columns, &table, &table.rows[0], 2).expect("row");
        assert!(row.manager_is_trainer);
        assert!(!row.employee_is_trainer);
    }

    #[test]
    fn relationship_columns_report_missing_headers() {
        let columns = RelationshipColumns::locate(&[
            "manager_empid".to_string(),
            "employee_empid".to_string(),
        ]);
        assert_eq!(columns.missing_required(), vec!["manager_name", "employee_name"]);
    }

    #[test]
    fn competency_row_coerces_float_empid() {
        let table = table(
            &["employee_id", "employee_name"],
            vec![vec![Cell::Number(5504763.0), Cell::Text("Dana".to_string())]],
        );
        let columns = CompetencyColumns::locate(&table.headers);

        let row = competency_row(&columns, &table, &table.rows[0], 2).expect("row");
        assert_eq!(row.employee_empid, "5504763");
    }

    #[test]
    fn competency_row_requires_empid() {
        let table = table(&["employee_id"], vec![vec![Cell::Empty]]);
        let columns = CompetencyColumns::locate(&table.headers);

        let err = competency_row(&columns, &table, &table.rows[0], 3).unwrap_err();
        assert_eq!(err.missing, vec!["employee_empid"]);
    }
}
