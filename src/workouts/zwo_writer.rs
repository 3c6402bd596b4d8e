//! Zwift workout (.zwo) writer.
//!
//! Repeats are written as one compact `IntervalsT` element. Ramps become one
//! `SteadyState` element per step so the file matches the chart.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::workouts::types::{IntervalSet, WorkoutBlock, WorkoutDocument, WorkoutSegment};

const AUTHOR: &str = "Converted from TXT";
const DESCRIPTION: &str = "Auto-converted workout from text format";
const SPORT_TYPE: &str = "bike";

/// Errors while producing .zwo markup.
#[derive(Debug, Error)]
pub enum ZwoWriteError {
    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Invalid UTF-8 in output: {0}")]
    Encoding(String),
}

/// Format a power fraction as the shortest text that round-trips, always
/// keeping a fractional part (`0.85`, `1.2`, `1.0`).
pub fn format_power(power: f64) -> String {
    let text = format!("{power}");
    if text.contains('.') || !power.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// Format a ramp step power with exactly three decimals.
pub fn format_step_power(power: f64) -> String {
    format!("{power:.3}")
}

/// Serialize a workout document to .zwo markup.
pub fn write_zwo(doc: &WorkoutDocument) -> Result<String, ZwoWriteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 4);

    start(&mut writer, BytesStart::new("workout_file"))?;
    write_element(&mut writer, "author", AUTHOR)?;
    write_element(&mut writer, "name", &doc.name)?;
    write_element(&mut writer, "description", DESCRIPTION)?;
    write_element(&mut writer, "sportType", SPORT_TYPE)?;
    empty(&mut writer, BytesStart::new("tags"))?;

    start(&mut writer, BytesStart::new("workout"))?;
    for block in &doc.blocks {
        write_block(&mut writer, doc, block)?;
    }
    end(&mut writer, "workout")?;

    end(&mut writer, "workout_file")?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ZwoWriteError::Encoding(e.to_string()))
}

fn write_block<W: std::io::Write>(
    writer: &mut Writer<W>,
    doc: &WorkoutDocument,
    block: &WorkoutBlock,
) -> Result<(), ZwoWriteError> {
    match block {
        WorkoutBlock::Steady(segment) => {
            let mut elem = BytesStart::new("SteadyState");
            elem.push_attribute(("Duration", segment.duration_seconds.to_string().as_str()));
            elem.push_attribute(("Power", format_power(segment.power.start()).as_str()));
            push_cadence(&mut elem, segment.cadence_rpm);
            empty(writer, elem)
        }
        WorkoutBlock::FreeRide(segment) => {
            let mut elem = BytesStart::new("FreeRide");
            elem.push_attribute(("Duration", segment.duration_seconds.to_string().as_str()));
            push_cadence(&mut elem, segment.cadence_rpm);
            empty(writer, elem)
        }
        WorkoutBlock::Ramp(segment) => write_ramp(writer, doc, segment),
        WorkoutBlock::Intervals(set) => write_intervals(writer, set),
    }
}

fn write_ramp<W: std::io::Write>(
    writer: &mut Writer<W>,
    doc: &WorkoutDocument,
    segment: &WorkoutSegment,
) -> Result<(), ZwoWriteError> {
    for step in doc.steps_for(segment) {
        let mut elem = BytesStart::new("SteadyState");
        // Zwift durations are whole seconds; step lengths are truncated.
        let duration = step.duration_seconds as u32;
        elem.push_attribute(("Duration", duration.to_string().as_str()));
        elem.push_attribute(("Power", format_step_power(step.power).as_str()));
        push_cadence(&mut elem, segment.cadence_rpm);
        empty(writer, elem)?;
    }
    Ok(())
}

fn write_intervals<W: std::io::Write>(
    writer: &mut Writer<W>,
    set: &IntervalSet,
) -> Result<(), ZwoWriteError> {
    let mut elem = BytesStart::new("IntervalsT");
    elem.push_attribute(("Repeat", set.repeat.to_string().as_str()));
    elem.push_attribute(("OnDuration", set.on_duration_seconds.to_string().as_str()));
    elem.push_attribute(("OffDuration", set.off_duration_seconds.to_string().as_str()));
    elem.push_attribute(("OnPower", format_power(set.on_power).as_str()));
    elem.push_attribute(("OffPower", format_power(set.off_power).as_str()));
    push_cadence(&mut elem, set.cadence_rpm);
    empty(writer, elem)
}

fn push_cadence(elem: &mut BytesStart<'_>, cadence_rpm: Option<u32>) {
    if let Some(rpm) = cadence_rpm {
        elem.push_attribute(("Cadence", rpm.to_string().as_str()));
    }
}

fn start<W: std::io::Write>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
) -> Result<(), ZwoWriteError> {
    writer
        .write_event(Event::Start(elem))
        .map_err(|e| ZwoWriteError::XmlError(e.to_string()))
}

fn end<W: std::io::Write>(writer: &mut Writer<W>, name: &str) -> Result<(), ZwoWriteError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| ZwoWriteError::XmlError(e.to_string()))
}

fn empty<W: std::io::Write>(
    writer: &mut Writer<W>,
    elem: BytesStart<'_>,
) -> Result<(), ZwoWriteError> {
    writer
        .write_event(Event::Empty(elem))
        .map_err(|e| ZwoWriteError::XmlError(e.to_string()))
}

/// Write a simple text element.
fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), ZwoWriteError> {
    start(writer, BytesStart::new(name))?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| ZwoWriteError::XmlError(e.to_string()))?;
    end(writer, name)
}
