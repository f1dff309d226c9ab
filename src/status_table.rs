use std::fmt;
use std::fmt::Formatter;
use crate::models::status_document::BatterySlotStatus;

/// Column position (1-based) of slot 0, column 1 holds the row labels
pub const COLUMN_OFFSET: usize = 2;

/// The rows of the status table, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Led,
    Type,
    Mode,
    Status,
    Voltage,
    Current,
    Capacity,
    Time,
    Temperature,
    Resistance,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Led, Field::Type, Field::Mode, Field::Status, Field::Voltage,
        Field::Current, Field::Capacity, Field::Time, Field::Temperature, Field::Resistance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Led         => "LED",
            Field::Type        => "Type",
            Field::Mode        => "Mode",
            Field::Status      => "Status",
            Field::Voltage     => "Voltage",
            Field::Current     => "Current",
            Field::Capacity    => "Capacity",
            Field::Time        => "Time",
            Field::Temperature => "Temperature",
            Field::Resistance  => "Resistance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// The LED indicator element, holding its own class attribute
    Led { class: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub class: Option<String>,
    pub content: Content,
}

impl Cell {
    fn text(text: &str) -> Cell {
        Cell { class: None, content: Content::Text(text.to_string()) }
    }

    pub fn as_text(&self) -> &str {
        match &self.content {
            Content::Text(t) => t,
            Content::Led { class } => class,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub field: Field,
    pub cells: Vec<Cell>,
}

/// Live per slot status table, mutated in place for the lifetime of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    rows: Vec<Row>,
}

impl StatusTable {
    /// Returns an empty table with a label column and one column per slot
    ///
    /// # Arguments
    ///
    /// * 'slots' - number of charger slots
    pub fn new(slots: usize) -> StatusTable {
        let rows = Field::ALL.iter().map(|&field| {
            let mut cells = vec![Cell::text(field.label())];
            for _ in 0..slots {
                cells.push(match field {
                    Field::Led => Cell { class: None, content: Content::Led { class: "led".to_string() } },
                    _ => Cell::text(""),
                });
            }
            Row { field, cells }
        }).collect();

        StatusTable { rows }
    }

    /// Column position of a slot, None if the slot index is beyond any position
    pub fn column(slot: usize) -> Option<usize> {
        slot.checked_add(COLUMN_OFFSET)
    }

    #[cfg(test)]
    pub fn slots(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len() - 1)
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the cell at a 1-based column position of the given row
    ///
    /// # Arguments
    ///
    /// * 'field' - the row
    /// * 'column' - 1-based column position
    #[cfg(test)]
    pub fn cell(&self, field: Field, column: usize) -> Option<&Cell> {
        self.rows.iter()
            .find(|r| r.field == field)
            .and_then(|r| r.cells.get(column.checked_sub(1)?))
    }

    fn cell_mut(&mut self, field: Field, column: usize) -> Option<&mut Cell> {
        self.rows.iter_mut()
            .find(|r| r.field == field)
            .and_then(|r| r.cells.get_mut(column.checked_sub(1)?))
    }

    fn set_text(&mut self, field: Field, column: usize, text: String) {
        if let Some(cell) = self.cell_mut(field, column) {
            cell.content = Content::Text(text);
        }
    }

    /// Writes the LED class and all descriptive and measurement cells of one slot.
    /// Cells are written in row order. Slots without a column are ignored.
    ///
    /// # Arguments
    ///
    /// * 'slot' - 0-based slot index
    /// * 'fields' - the slot status to display
    pub fn update_slot(&mut self, slot: usize, fields: &BatterySlotStatus) {
        let Some(column) = StatusTable::column(slot) else {
            return;
        };

        if let Some(cell) = self.cell_mut(Field::Led, column) {
            cell.content = Content::Led { class: format!("led {}", fields.led) };
        }
        self.set_text(Field::Type, column, fields.battery_type.clone());
        self.set_text(Field::Mode, column, fields.mode.clone());
        self.set_text(Field::Status, column, fields.status.clone());
        self.set_text(Field::Voltage, column, format!("{} V", fields.voltage));
        self.set_text(Field::Current, column, format!("{} A", fields.current));
        self.set_text(Field::Capacity, column, format!("{} mAh", fields.capacity));
        self.set_text(Field::Time, column, fields.time.to_string());
        self.set_text(Field::Temperature, column, format!("{} °C", fields.temperature));
        self.set_text(Field::Resistance, column, format!("{} mΩ", fields.resistance));
    }

    /// Sets the class of the slot's cell in every row, the status is lowercased first
    ///
    /// # Arguments
    ///
    /// * 'slot' - 0-based slot index
    /// * 'status' - status as reported by the charger
    pub fn set_status_class(&mut self, slot: usize, status: &str) {
        let Some(column) = StatusTable::column(slot) else {
            return;
        };
        let class = status.to_lowercase();

        for row in self.rows.iter_mut() {
            if let Some(cell) = row.cells.get_mut(column - 1) {
                cell.class = Some(class.clone());
            }
        }
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for StatusTable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.cells.iter().enumerate() {
                if i == 0 {
                    line += &format!("{:<12}", cell.as_text());
                } else {
                    line += &format!("| {:<18}", cell.as_text());
                }
            }
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status_document::Measurement;

    fn status(slot: usize, status: &str) -> BatterySlotStatus {
        BatterySlotStatus {
            slot,
            led: "red".to_string(),
            battery_type: "LiIon".to_string(),
            mode: "Charge".to_string(),
            status: status.to_string(),
            voltage: Measurement::Number(4.1),
            current: Measurement::Number(1.0),
            capacity: Measurement::Number(950.0),
            time: Measurement::Text("52 minutes".to_string()),
            temperature: Measurement::Number(31.0),
            resistance: Measurement::Text("n/a".to_string()),
        }
    }

    #[test]
    fn new_table_has_label_and_slot_columns() {
        let table = StatusTable::new(4);
        assert_eq!(table.slots(), 4);
        assert_eq!(table.cell(Field::Voltage, 1).unwrap().as_text(), "Voltage");
        assert_eq!(table.cell(Field::Led, 2).unwrap().content, Content::Led { class: "led".to_string() });
        assert!(table.cell(Field::Voltage, 6).is_none());
        assert!(table.cell(Field::Voltage, 0).is_none());
    }

    #[test]
    fn update_slot_writes_units() {
        let mut table = StatusTable::new(4);
        table.update_slot(1, &status(1, "Charge"));

        assert_eq!(table.cell(Field::Led, 3).unwrap().content, Content::Led { class: "led red".to_string() });
        assert_eq!(table.cell(Field::Type, 3).unwrap().as_text(), "LiIon");
        assert_eq!(table.cell(Field::Status, 3).unwrap().as_text(), "Charge");
        assert_eq!(table.cell(Field::Voltage, 3).unwrap().as_text(), "4.1 V");
        assert_eq!(table.cell(Field::Current, 3).unwrap().as_text(), "1 A");
        assert_eq!(table.cell(Field::Capacity, 3).unwrap().as_text(), "950 mAh");
        assert_eq!(table.cell(Field::Time, 3).unwrap().as_text(), "52 minutes");
        assert_eq!(table.cell(Field::Temperature, 3).unwrap().as_text(), "31 °C");
        assert_eq!(table.cell(Field::Resistance, 3).unwrap().as_text(), "n/a mΩ");
    }

    #[test]
    fn status_class_spans_every_row_of_one_column() {
        let mut table = StatusTable::new(2);
        table.set_status_class(0, "Completed");

        for row in table.rows() {
            assert_eq!(row.cells[1].class.as_deref(), Some("completed"));
            assert_eq!(row.cells[0].class, None);
            assert_eq!(row.cells[2].class, None);
        }
    }

    #[test]
    fn slots_without_column_are_ignored() {
        let mut table = StatusTable::new(2);
        let before = table.clone();
        table.update_slot(5, &status(5, "Charge"));
        table.set_status_class(5, "Charge");
        table.update_slot(usize::MAX, &status(usize::MAX, "Charge"));
        table.set_status_class(usize::MAX, "Charge");
        assert_eq!(table, before);
        assert_eq!(StatusTable::column(usize::MAX), None);
    }
}
