//! `.ste` import: document into a settings record
//!
//! Walks the document in order; with several `<server>` elements the last
//! one wins for every server field, matching the legacy importer's
//! unconditional overwrite during traversal.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::str;

use crate::codec::decode_password;
use crate::error::{Result, SiteError};
use crate::settings::SiteSettings;
use crate::{ACCESS_FTPS, ACCESS_SFTP};

/// Parse `.ste` XML text into a settings record.
///
/// Fails with [`SiteError::TemplateMalformed`] when the document has no
/// `<localinfo>` element or no `<server>` inside `<serverlist>`. The `pw`
/// attribute is decoded through the codec; its errors propagate.
pub fn read_site(xml: &str) -> Result<SiteSettings> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut settings = SiteSettings::default();
    let mut saw_localinfo = false;
    let mut saw_server = false;
    let mut in_serverlist = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"localinfo" => {
                    read_localinfo(e, &mut settings)?;
                    saw_localinfo = true;
                }
                b"serverlist" => in_serverlist = true,
                b"server" if in_serverlist => {
                    read_server(e, &mut settings)?;
                    saw_server = true;
                }
                _ => {}
            },
            // A self-closing serverlist has no children and opens no scope.
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"localinfo" => {
                    read_localinfo(e, &mut settings)?;
                    saw_localinfo = true;
                }
                b"server" if in_serverlist => {
                    read_server(e, &mut settings)?;
                    saw_server = true;
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"serverlist" {
                    in_serverlist = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SiteError::TemplateMalformed(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !saw_localinfo {
        return Err(SiteError::TemplateMalformed(
            "document has no localinfo element".to_string(),
        ));
    }
    if !saw_server {
        return Err(SiteError::TemplateMalformed(
            "document has no server element in serverlist".to_string(),
        ));
    }

    Ok(settings)
}

/// Read the `<localinfo>` attributes.
///
/// Fields are cleared first so a later `<localinfo>` fully replaces an
/// earlier one, absent attributes included.
fn read_localinfo(e: &BytesStart, settings: &mut SiteSettings) -> Result<()> {
    settings.site_name.clear();
    settings.site_root.clear();
    settings.image_folder.clear();
    settings.remote_url.clear();

    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let val = attr
            .unescape_value()
            .map_err(|err| SiteError::TemplateMalformed(err.to_string()))?;

        match key {
            "sitename" => settings.site_name = val.to_string(),
            "localroot" => settings.site_root = val.to_string(),
            "imagefolder" => settings.image_folder = val.to_string(),
            "httpaddress" => settings.remote_url = val.to_string(),
            _ => {}
        }
    }

    Ok(())
}

/// Read one `<server>` element's attributes.
///
/// Server fields are cleared first: the last server determines every one of
/// them, whether or not it carries the attribute. The marker attributes map
/// back to `access_type` and take precedence over `accesstype` because the
/// exporter writes them after it.
fn read_server(e: &BytesStart, settings: &mut SiteSettings) -> Result<()> {
    settings.remote_url.clear();
    settings.access_type.clear();
    settings.hostname.clear();
    settings.remote_path.clear();
    settings.remote_user.clear();
    settings.remote_password.clear();
    settings.auto_upload.clear();
    settings.checkout_when_open.clear();
    settings.passive_mode.clear();

    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let val = attr
            .unescape_value()
            .map_err(|err| SiteError::TemplateMalformed(err.to_string()))?;
        let val = val.as_ref();

        match key {
            "weburl" => settings.remote_url = val.to_string(),
            "accesstype" => settings.access_type = val.to_string(),
            "host" => settings.hostname = val.to_string(),
            "remoteroot" => settings.remote_path = val.to_string(),
            "user" => settings.remote_user = val.to_string(),
            "pw" => settings.remote_password = decode_password(val)?,
            "autoUpload" => settings.auto_upload = val.to_string(),
            "checkoutwhenopen" => settings.checkout_when_open = val.to_string(),
            "usepasv" => settings.passive_mode = val.to_string(),
            "useSFTP" if val == "TRUE" => settings.access_type = ACCESS_SFTP.to_string(),
            "useFTPS" if val == "TRUE" => settings.access_type = ACCESS_FTPS.to_string(),
            // "name" mirrors "host" on export and is not read back.
            _ => {}
        }
    }

    Ok(())
}
