//! Shop profile and data folder commands.

use std::io::Write;

use tracing::info;
use vyapar_core::ShopSettings;
use vyapar_storage::DataFolderBackend;

use super::{write_json, Context};
use crate::args::SettingsCommand;
use crate::error::{CliError, CliResult};

pub fn run<W: Write>(cmd: SettingsCommand, ctx: &mut Context<'_>, out: &mut W) -> CliResult<()> {
    match cmd {
        SettingsCommand::Show => {
            let settings = &ctx.store.state().settings;
            if ctx.json {
                return write_json(out, settings);
            }
            writeln!(out, "Shop:        {}", settings.shop_name)?;
            writeln!(out, "Owner:       {}", settings.owner_name)?;
            writeln!(out, "Contact:     {}", settings.contact_number)?;
            writeln!(out, "Address:     {}", settings.address)?;
            writeln!(
                out,
                "Data folder: {}",
                settings.data_folder().unwrap_or("(not set)")
            )?;
        }

        SettingsCommand::Set {
            shop_name,
            owner_name,
            contact,
            address,
        } => {
            let current = &ctx.store.state().settings;
            let keep = |value: Option<String>, old: &str| {
                value.map_or_else(|| old.to_string(), |v| v.trim().to_string())
            };

            let updated = ShopSettings {
                shop_name: keep(shop_name, &current.shop_name),
                owner_name: keep(owner_name, &current.owner_name),
                contact_number: keep(contact, &current.contact_number),
                address: keep(address, &current.address),
                data_folder_path: current.data_folder_path.clone(),
            };

            if updated == *current {
                writeln!(out, "Settings unchanged.")?;
            } else {
                ctx.store.update_settings(updated);
                writeln!(out, "Settings saved.")?;
            }
        }

        SettingsCommand::Folder { path, clear } => {
            if clear {
                ctx.store.set_data_folder(None);
                writeln!(out, "Data folder cleared.")?;
            } else if let Some(path) = path {
                if !ctx.persistence.has_folder_backend() {
                    return Err(CliError::unsupported(
                        "Data folder sync is off. Set desktop_folder = true in storage.toml \
                         or VYAPAR_DESKTOP_FOLDER=1",
                    ));
                }
                let folder = DataFolderBackend::select_folder(&path)?;
                info!(folder = ?folder, "Data folder selected");
                ctx.store
                    .set_data_folder(Some(folder.display().to_string()));
                writeln!(out, "Data folder: {}", folder.display())?;
            } else {
                let current = ctx.store.state().settings.data_folder();
                writeln!(out, "{}", current.unwrap_or("(not set)"))?;
            }
        }
    }
    Ok(())
}
