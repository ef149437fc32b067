//! Rendering of final worlds into the output template.

use crate::document::{CELLS, ORGANISM, ORGANISMS, SPECIES, WORLD, X_POS, Y_POS};
use life_core::{Error, OutputConfig, Result, World};
use life_world::Grid;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Elements of the template whose content is replaced while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Cells,
    Species,
    Organisms,
}

impl Slot {
    fn at(path: &[Vec<u8>]) -> Option<Self> {
        match path {
            [_, world, cells] if world == WORLD.as_bytes() && cells == CELLS.as_bytes() => {
                Some(Slot::Cells)
            }
            [_, world, species] if world == WORLD.as_bytes() && species == SPECIES.as_bytes() => {
                Some(Slot::Species)
            }
            [_, organisms] if organisms == ORGANISMS.as_bytes() => Some(Slot::Organisms),
            _ => None,
        }
    }

    fn element(&self) -> &'static str {
        match self {
            Slot::Cells => CELLS,
            Slot::Species => SPECIES,
            Slot::Organisms => ORGANISMS,
        }
    }
}

/// Render `grid` into the configured template and write it to `path`.
///
/// Nothing is written unless the template renders completely.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn save_world(path: &Path, world: &World, grid: &Grid, config: &OutputConfig) -> Result<()> {
    let template_path = config.template_file();
    let template = fs::read_to_string(&template_path).map_err(|e| {
        Error::OutputWrite(format!(
            "cannot read template {}: {}",
            template_path.display(),
            e
        ))
    })?;

    let xml = render_world(&template, world, grid)?;
    fs::write(path, xml)
        .map_err(|e| Error::OutputWrite(format!("{}: {}", path.display(), e)))?;

    info!(organisms = grid.population(), "World saved");
    Ok(())
}

/// Fill `template` with the world size, species count and one organism per occupied cell
pub fn render_world(template: &str, world: &World, grid: &Grid) -> Result<String> {
    let mut reader = Reader::from_str(template);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut path: Vec<Vec<u8>> = Vec::new();
    // Depth of the slot element whose template content is being dropped
    let mut replacing: Option<usize> = None;
    let mut filled: Vec<Slot> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::OutputWrite(format!("invalid template: {}", e)))?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                path.push(start.name().as_ref().to_vec());
                if replacing.is_some() {
                    continue;
                }

                writer.write_event(Event::Start(start)).map_err(write_err)?;
                if let Some(slot) = Slot::at(&path) {
                    fill_slot(&mut writer, slot, world, grid)?;
                    filled.push(slot);
                    replacing = Some(path.len());
                }
            }
            Event::End(end) => {
                let depth = path.len();
                path.pop();
                match replacing {
                    Some(slot_depth) if depth > slot_depth => continue,
                    Some(_) => replacing = None,
                    None => {}
                }
                writer.write_event(Event::End(end)).map_err(write_err)?;
            }
            Event::Empty(start) => {
                if replacing.is_some() {
                    continue;
                }

                path.push(start.name().as_ref().to_vec());
                match Slot::at(&path) {
                    Some(slot) => {
                        let name = slot.element();
                        writer
                            .write_event(Event::Start(BytesStart::new(name)))
                            .map_err(write_err)?;
                        fill_slot(&mut writer, slot, world, grid)?;
                        writer
                            .write_event(Event::End(BytesEnd::new(name)))
                            .map_err(write_err)?;
                        filled.push(slot);
                    }
                    None => writer.write_event(Event::Empty(start)).map_err(write_err)?,
                }
                path.pop();
            }
            other => {
                if replacing.is_none() {
                    writer.write_event(other).map_err(write_err)?;
                }
            }
        }
    }

    for slot in [Slot::Cells, Slot::Species, Slot::Organisms] {
        if !filled.contains(&slot) {
            return Err(Error::OutputWrite(format!(
                "template is missing element '{}'",
                slot.element()
            )));
        }
    }

    let mut xml = String::from_utf8(writer.into_inner()).map_err(write_err)?;
    xml.push('\n');
    Ok(xml)
}

fn fill_slot(writer: &mut Writer<Vec<u8>>, slot: Slot, world: &World, grid: &Grid) -> Result<()> {
    match slot {
        Slot::Cells => write_text(writer, &world.size.to_string()),
        Slot::Species => write_text(writer, &world.species_count.to_string()),
        Slot::Organisms => {
            for (pos, species) in grid.occupied() {
                writer
                    .write_event(Event::Start(BytesStart::new(ORGANISM)))
                    .map_err(write_err)?;
                write_element(writer, X_POS, &pos.x.to_string())?;
                write_element(writer, Y_POS, &pos.y.to_string())?;
                write_element(writer, SPECIES, &species.to_string())?;
                writer
                    .write_event(Event::End(BytesEnd::new(ORGANISM)))
                    .map_err(write_err)?;
            }
            debug!(organisms = grid.population(), "Organisms rendered");
            Ok(())
        }
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_err)?;
    write_text(writer, text)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_err)
}

fn write_text(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(write_err)
}

fn write_err<E: std::fmt::Display>(err: E) -> Error {
    Error::OutputWrite(err.to_string())
}
