//! Background line reader.
//!
//! [`LineIngestor`] owns a thread that reads the input stream in chunks, splits
//! it on `\n` and sends each raw line to the main loop over an unbounded
//! channel. The main loop drains the channel once per tick with
//! [`LineIngestor::poll_lines`], which never blocks.
//!
//! End of input is signalled by the reader dropping its sender: once the
//! queue is empty, `try_recv` reports `Disconnected`, so every line sent
//! before EOF is always delivered before EOF is observed.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// Size of each read from the input stream.
const CHUNK_SIZE: usize = 64 * 1024;

/// Reads lines from a stream on a background thread.
#[derive(Debug)]
pub struct LineIngestor {
    receiver: Receiver<Vec<u8>>,
    handle: Option<JoinHandle<()>>,
    eof: bool,
}

impl LineIngestor {
    /// Starts reading `reader` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::io::Cursor;
    /// use sift::worker::LineIngestor;
    ///
    /// let mut ingestor = LineIngestor::spawn(Cursor::new(b"a\nb\n".to_vec()))?;
    /// let mut lines = Vec::new();
    /// while !ingestor.poll_lines(&mut lines) {
    ///     std::thread::yield_now();
    /// }
    /// assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec()]);
    /// # Ok::<(), sift::SiftError>(())
    /// ```
    pub fn spawn<R>(reader: R) -> crate::Result<Self>
    where
        R: Read + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("sift-reader".to_string())
            .spawn(move || read_lines(reader, &sender))?;

        tracing::debug!("reader thread started");
        Ok(Self {
            receiver,
            handle: Some(handle),
            eof: false,
        })
    }

    /// Moves every line currently queued into `out`.
    ///
    /// Returns `true` once the reader has finished and the queue is empty.
    /// After that it keeps returning `true` without touching `out`.
    pub fn poll_lines(&mut self, out: &mut Vec<Vec<u8>>) -> bool {
        if self.eof {
            return true;
        }

        loop {
            match self.receiver.try_recv() {
                Ok(line) => out.push(line),
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("reader finished");
                    self.eof = true;
                    return true;
                }
            }
        }
    }

    /// Releases the reader thread.
    ///
    /// A finished thread is joined. A thread still blocked in `read` (input
    /// that never ends) is detached; it exits on its own once the read
    /// returns and its send fails.
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        if handle.is_finished() {
            if handle.join().is_err() {
                tracing::warn!("reader thread panicked");
            }
        } else {
            tracing::debug!("reader still blocked, detaching");
        }
    }
}

impl Drop for LineIngestor {
    fn drop(&mut self) {
        self.release();
    }
}

/// Reader thread body. Returns when input ends, a read fails, or the
/// receiving side is gone.
fn read_lines<R: Read>(mut reader: R, sender: &Sender<Vec<u8>>) {
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut partial: Vec<u8> = Vec::new();
    let mut sent = 0usize;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "read failed, treating as end of input");
                break;
            }
        };

        let mut rest = &chunk[..n];
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            partial.extend_from_slice(&rest[..pos]);
            if sender.send(std::mem::take(&mut partial)).is_err() {
                tracing::debug!("receiver dropped, stopping reader");
                return;
            }
            sent += 1;
            rest = &rest[pos + 1..];
        }
        partial.extend_from_slice(rest);
    }

    if !partial.is_empty() && sender.send(partial).is_ok() {
        sent += 1;
    }

    tracing::debug!(lines = sent, "end of input");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use std::time::{Duration, Instant};

    fn drain(ingestor: &mut LineIngestor) -> Vec<Vec<u8>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut lines = Vec::new();
        while !ingestor.poll_lines(&mut lines) {
            assert!(Instant::now() < deadline, "reader never finished");
            thread::sleep(Duration::from_millis(1));
        }
        lines
    }

    /// Hands out its data a few bytes at a time, then optionally fails.
    struct Trickle {
        data: Vec<u8>,
        pos: usize,
        step: usize,
        fail_at_end: bool,
        interrupted_once: bool,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted_once {
                self.interrupted_once = true;
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            if self.pos >= self.data.len() {
                if self.fail_at_end {
                    return Err(io::Error::new(ErrorKind::Other, "boom"));
                }
                return Ok(0);
            }
            let n = self.step.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn splits_lines_and_flushes_unterminated_tail() {
        let mut ingestor = LineIngestor::spawn(Cursor::new(b"one\ntwo\n\nthree".to_vec())).unwrap();
        let lines = drain(&mut ingestor);
        assert_eq!(
            lines,
            vec![b"one".to_vec(), b"two".to_vec(), Vec::new(), b"three".to_vec()]
        );
        ingestor.shutdown();
    }

    #[test]
    fn lines_split_across_reads_are_reassembled() {
        let reader = Trickle {
            data: b"alpha\nbeta\ngamma\n".to_vec(),
            pos: 0,
            step: 3,
            fail_at_end: false,
            interrupted_once: false,
        };
        let mut ingestor = LineIngestor::spawn(reader).unwrap();
        assert_eq!(
            drain(&mut ingestor),
            vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()]
        );
    }

    #[test]
    fn read_error_ends_input_after_pending_lines() {
        let reader = Trickle {
            data: b"kept\npartial".to_vec(),
            pos: 0,
            step: 64,
            fail_at_end: true,
            interrupted_once: false,
        };
        let mut ingestor = LineIngestor::spawn(reader).unwrap();
        assert_eq!(drain(&mut ingestor), vec![b"kept".to_vec(), b"partial".to_vec()]);
    }

    #[test]
    fn eof_is_sticky() {
        let mut ingestor = LineIngestor::spawn(Cursor::new(Vec::new())).unwrap();
        assert!(drain(&mut ingestor).is_empty());
        let mut more = Vec::new();
        assert!(ingestor.poll_lines(&mut more));
        assert!(more.is_empty());
    }

    #[test]
    fn shutdown_does_not_wait_for_blocked_reader() {
        struct Blocked(mpsc::Receiver<()>);
        impl Read for Blocked {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                let _ = self.0.recv();
                Ok(0)
            }
        }

        let (release, hold) = mpsc::channel();
        let mut ingestor = LineIngestor::spawn(Blocked(hold)).unwrap();
        let mut lines = Vec::new();
        assert!(!ingestor.poll_lines(&mut lines));

        let started = Instant::now();
        ingestor.shutdown();
        assert!(started.elapsed() < Duration::from_secs(1));
        drop(release);
    }
}
