use std::io::{Seek, SeekFrom};

use data_error::Result;

/// Run `scan` against `stream` and put the cursor back where it was
/// before the call, whether `scan` succeeded or not.
///
/// When both the scan and the restoring seek fail, the scan error wins.
pub fn with_saved_cursor<S, T, F>(stream: &mut S, scan: F) -> Result<T>
where
    S: Seek + ?Sized,
    F: FnOnce(&mut S) -> Result<T>,
{
    let saved = stream.stream_position()?;
    let outcome = scan(stream);
    let restored = stream.seek(SeekFrom::Start(saved));
    log::trace!("Cursor restored to byte {}", saved);

    let value = outcome?;
    restored?;
    Ok(value)
}

/// Total length of the stream in bytes. The cursor is left untouched.
pub fn stream_len<S: Seek + ?Sized>(stream: &mut S) -> Result<u64> {
    with_saved_cursor(stream, |s| Ok(s.seek(SeekFrom::End(0))?))
}

/// Whether the cursor sits at (or beyond) the end of the stream.
pub fn at_end<S: Seek + ?Sized>(stream: &mut S) -> Result<bool> {
    let position = stream.stream_position()?;
    Ok(position >= stream_len(stream)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_error::CsvError;
    use std::io::{Cursor, Read};

    #[test]
    fn restores_position_after_success() {
        let mut stream = Cursor::new(b"0123456789".to_vec());
        stream.set_position(4);

        let byte = with_saved_cursor(&mut stream, |s| {
            s.seek(SeekFrom::Start(8))?;
            let mut buf = [0u8; 1];
            s.read_exact(&mut buf)?;
            Ok(buf[0])
        })
        .unwrap();

        assert_eq!(byte, b'8');
        assert_eq!(stream.position(), 4);
    }

    #[test]
    fn restores_position_after_failure() {
        let mut stream = Cursor::new(b"0123456789".to_vec());
        stream.set_position(2);

        let result: Result<()> = with_saved_cursor(&mut stream, |s| {
            s.seek(SeekFrom::End(0))?;
            Err(CsvError::RowOutOfRange(7))
        });

        assert!(matches!(result, Err(CsvError::RowOutOfRange(7))));
        assert_eq!(stream.position(), 2);
    }

    #[test]
    fn length_and_end_detection() {
        let mut stream = Cursor::new(b"abc".to_vec());
        assert_eq!(stream_len(&mut stream).unwrap(), 3);
        assert!(!at_end(&mut stream).unwrap());
        assert_eq!(stream.position(), 0);

        stream.set_position(3);
        assert!(at_end(&mut stream).unwrap());
    }
}
