//! Minimal CSV reader/writer for beat tables and generator configs.
//! Handles quoted fields, doubled quotes, and LF or CRLF line endings.

/// Split CSV text into records. A trailing newline does not produce an
/// empty record; a blank line in the middle produces a record with one
/// empty field, matching Python's `csv.reader` closely enough for our files.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_record_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                at_record_start = false;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                at_record_start = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if at_record_start {
                    records.push(Vec::new());
                } else {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                at_record_start = true;
            }
            _ => {
                field.push(c);
                at_record_start = false;
            }
        }
    }
    if !at_record_start {
        record.push(field);
        records.push(record);
    }
    records
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

pub fn write_record(out: &mut String, fields: &[String]) {
    for (i, f) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quotes(f) {
            out.push('"');
            out.push_str(&f.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(f);
        }
    }
    out.push_str("\r\n");
}
