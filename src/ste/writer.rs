//! `.ste` export: settings into a template document
//!
//! Streams the template through an event writer, rewriting the attributes of
//! `<localinfo>` and of every `<server>` inside `<serverlist>`. Everything
//! else in the template passes through unchanged.

use std::io::Cursor;
use std::str;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

use crate::codec::encode_password;
use crate::error::{Result, SiteError};
use crate::settings::SiteSettings;
use crate::{ACCESS_FTPS, ACCESS_SFTP, XML_DECLARATION};

/// Render a settings record into `.ste` XML text using the given template.
///
/// The template must contain a `<localinfo>` element and at least one
/// `<server>` element inside `<serverlist>`; otherwise the export fails with
/// [`SiteError::TemplateMalformed`]. Template attributes not covered by the
/// mapping are kept, as is any other template content.
pub fn write_site(settings: &SiteSettings, template: &str) -> Result<String> {
    let encoded_pw = encode_password(&settings.remote_password)?;

    let localinfo_attrs: Vec<(&str, &str)> = vec![
        ("sitename", settings.site_name.as_str()),
        ("localroot", settings.site_root.as_str()),
        ("imagefolder", settings.image_folder.as_str()),
        ("httpaddress", settings.remote_url.as_str()),
    ];

    let mut server_attrs: Vec<(&str, &str)> = vec![
        ("weburl", settings.remote_url.as_str()),
        ("accesstype", settings.access_type.as_str()),
        ("host", settings.hostname.as_str()),
        ("name", settings.hostname.as_str()),
        ("remoteroot", settings.remote_path.as_str()),
        ("user", settings.remote_user.as_str()),
        ("pw", encoded_pw.as_str()),
        ("autoUpload", settings.auto_upload.as_str()),
        ("checkoutwhenopen", settings.checkout_when_open.as_str()),
        ("usepasv", settings.passive_mode.as_str()),
    ];

    // Marker attributes: one or the other, never both, neither for plain FTP.
    if settings.access_type == ACCESS_SFTP {
        server_attrs.push(("useSFTP", "TRUE"));
    }
    if settings.access_type == ACCESS_FTPS {
        server_attrs.push(("useFTPS", "TRUE"));
    }

    let mut reader = Reader::from_str(template);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let mut saw_localinfo = false;
    let mut saw_server = false;
    let mut in_serverlist = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if e.name().as_ref() == b"serverlist" {
                    in_serverlist = true;
                }
                match rewrite_element(
                    e,
                    in_serverlist,
                    &localinfo_attrs,
                    &server_attrs,
                    &mut saw_localinfo,
                    &mut saw_server,
                )? {
                    Some(rewritten) => writer.write_event(Event::Start(rewritten))?,
                    None => writer.write_event(Event::Start(e.to_owned()))?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                match rewrite_element(
                    e,
                    in_serverlist,
                    &localinfo_attrs,
                    &server_attrs,
                    &mut saw_localinfo,
                    &mut saw_server,
                )? {
                    Some(rewritten) => writer.write_event(Event::Empty(rewritten))?,
                    None => writer.write_event(Event::Empty(e.to_owned()))?,
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"serverlist" {
                    in_serverlist = false;
                }
                writer.write_event(Event::End(e.to_owned()))?;
            }
            // The declaration line is prepended verbatim below.
            Ok(Event::Decl(_)) => {}
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event)?,
            Err(e) => {
                return Err(SiteError::TemplateMalformed(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    if !saw_localinfo {
        return Err(SiteError::TemplateMalformed(
            "template has no localinfo element".to_string(),
        ));
    }
    if !saw_server {
        return Err(SiteError::TemplateMalformed(
            "template has no server element in serverlist".to_string(),
        ));
    }

    let body = String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| SiteError::TemplateMalformed(e.to_string()))?;

    Ok(format!("{XML_DECLARATION}\n{body}"))
}

/// Rewrite one element's attributes if the mapping covers it.
///
/// Returns `None` for elements the mapping does not touch; those are
/// forwarded verbatim.
fn rewrite_element(
    e: &BytesStart,
    in_serverlist: bool,
    localinfo_attrs: &[(&str, &str)],
    server_attrs: &[(&str, &str)],
    saw_localinfo: &mut bool,
    saw_server: &mut bool,
) -> Result<Option<BytesStart<'static>>> {
    match e.name().as_ref() {
        b"localinfo" => {
            *saw_localinfo = true;
            apply_attrs(e, localinfo_attrs).map(Some)
        }
        b"server" if in_serverlist => {
            *saw_server = true;
            apply_attrs(e, server_attrs).map(Some)
        }
        _ => Ok(None),
    }
}

/// Copy an element, overriding the mapped attributes.
///
/// Template attributes keep their original order; mapped attributes the
/// template did not carry are appended.
fn apply_attrs(e: &BytesStart, overrides: &[(&str, &str)]) -> Result<BytesStart<'static>> {
    let name = str::from_utf8(e.name().as_ref())
        .map_err(|_| SiteError::TemplateMalformed("invalid UTF-8 in tag name".to_string()))?
        .to_string();
    let mut elem = BytesStart::new(name);
    let mut written: Vec<String> = Vec::new();

    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())
            .map_err(|_| SiteError::TemplateMalformed("invalid UTF-8 in attribute".to_string()))?;

        if let Some((_, value)) = overrides.iter().find(|(k, _)| *k == key) {
            elem.push_attribute((key, *value));
            written.push(key.to_string());
        } else {
            let value = attr
                .unescape_value()
                .map_err(|err| SiteError::TemplateMalformed(err.to_string()))?;
            elem.push_attribute((key, value.as_ref()));
        }
    }

    for (key, value) in overrides {
        if !written.iter().any(|k| k.as_str() == *key) {
            elem.push_attribute((*key, *value));
        }
    }

    Ok(elem)
}
