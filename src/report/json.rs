//! JSON report: the serialized page model

use crate::data::ApostlesData;
use crate::report::PageModel;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, data: &ApostlesData) -> io::Result<()> {
    let page = PageModel::compose(data);
    let json = serde_json::to_string_pretty(&page)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")
}
