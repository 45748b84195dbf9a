/// Builds the URL of the rate document for one day:
/// `{base}{year}/{month:02}/{day:02}.xml`.
///
/// The base is used verbatim, so it must already end with the separator the
/// server expects (usually `/`). Month and day are zero-padded to two digits
/// and are otherwise passed through; range checks belong to the caller.
pub fn document_url(base: &str, year: i32, month: u32, day: u32) -> String {
    format!("{}{}/{:02}/{:02}.xml", base, year, month, day)
}
