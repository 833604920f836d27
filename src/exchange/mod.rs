/*!
 * Portable text exchange format for the dictionary.
 *
 * One record per line, lines separated by CRLF:
 *
 * ```text
 * CONFIGURATION_PREFIX:<language>[:<root topic name>]
 * <article>:<word>:<additional information>:<translations>:<topics>
 * ```
 *
 * `translations` is a `;` terminated list of `<language>=<text>` pairs and
 * `topics` a `;` terminated list of `<level>=<name>` pairs. Every text field
 * is percent-encoded so the delimiters never appear literally.
 *
 * A header starts a section: every word after it belongs to the header's
 * language, and its topics hang under the header's root topic. A header
 * has at most three fields and a word line always five, so an article that
 * reads `CONFIGURATION_PREFIX` is not taken for a header.
 */

pub mod encoding;
pub mod exporter;
pub mod importer;

pub use encoding::{decode, encode};
pub use exporter::{export_words, export_words_to_file, ExportScope};
pub use importer::WordImporter;

/// Separates the fields of a line
pub const MAIN_DIVIDER: char = ':';

/// Terminates each translation and topic entry
pub const PARTS_DIVIDER: char = ';';

/// Separates key and value inside an entry
pub const ELEMENT_DIVIDER: char = '=';

/// Line terminator of exported files
pub const LINE_SEPARATOR: &str = "\r\n";

/// First field of a section header line
pub const CONFIGURATION_PREFIX: &str = "CONFIGURATION_PREFIX";
