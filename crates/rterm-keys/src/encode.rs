//! `encode` turns a logical [`Key`] into the byte sequence a host expects,
//! per the active [`EncoderModes`].

use smallvec::SmallVec;

use crate::key::{Key, KeypadKey};
use crate::modes::{ArrowKeyMode, BackspaceMode, EncoderModes, KeypadMode};

pub type Encoded = SmallVec<[u8; 8]>;

fn from_bytes(bytes: &[u8]) -> Encoded {
    Encoded::from_slice(bytes)
}

fn arrow(modes: &EncoderModes, final_byte: u8) -> Encoded {
    match modes.arrow {
        ArrowKeyMode::Ansi => from_bytes(&[0x1b, b'[', final_byte]),
        ArrowKeyMode::Vt100 => from_bytes(&[0x1b, b'O', final_byte]),
        ArrowKeyMode::Vt52 => from_bytes(&[0x1b, final_byte]),
    }
}

fn csi_tilde(n: u8) -> Encoded {
    let mut buf = Encoded::new();
    buf.push(0x1b);
    buf.push(b'[');
    let mut itoa_buf = itoa::Buffer::new();
    buf.extend_from_slice(itoa_buf.format(n).as_bytes());
    buf.push(b'~');
    buf
}

/// F1-F20 per the xterm convention; F1-F4 use SS3 letters, the rest use
/// CSI-tilde numbers. F21-F24 are synthesized as shift-modified F9-F12.
fn function_key_xterm(n: u8) -> Encoded {
    match n {
        1 => from_bytes(&[0x1b, b'O', b'P']),
        2 => from_bytes(&[0x1b, b'O', b'Q']),
        3 => from_bytes(&[0x1b, b'O', b'R']),
        4 => from_bytes(&[0x1b, b'O', b'S']),
        5 => csi_tilde(15),
        6 => csi_tilde(17),
        7 => csi_tilde(18),
        8 => csi_tilde(19),
        9 => csi_tilde(20),
        10 => csi_tilde(21),
        11 => csi_tilde(23),
        12 => csi_tilde(24),
        13 => csi_tilde(25),
        14 => csi_tilde(26),
        15 => csi_tilde(28),
        16 => csi_tilde(29),
        17 => csi_tilde(31),
        18 => csi_tilde(32),
        19 => csi_tilde(33),
        20 => csi_tilde(34),
        21..=24 => from_bytes(&[0x1b, b'[', b'1', b';', b'2', shifted_final(n - 12)]),
        _ => Encoded::new(),
    }
}

fn shifted_final(n: u8) -> u8 {
    match n {
        1 => b'P',
        2 => b'Q',
        3 => b'R',
        4 => b'S',
        _ => b'~',
    }
}

/// F1-F12 per the Linux console convention; F13-F24 fall back to the
/// xterm table since the Linux console has no native notion of them.
fn function_key_linux(n: u8) -> Encoded {
    match n {
        1 => from_bytes(&[0x1b, b'[', b'[', b'A']),
        2 => from_bytes(&[0x1b, b'[', b'[', b'B']),
        3 => from_bytes(&[0x1b, b'[', b'[', b'C']),
        4 => from_bytes(&[0x1b, b'[', b'[', b'D']),
        5 => from_bytes(&[0x1b, b'[', b'[', b'E']),
        6 => csi_tilde(17),
        7 => csi_tilde(18),
        8 => csi_tilde(19),
        9 => csi_tilde(20),
        10 => csi_tilde(21),
        11 => csi_tilde(23),
        12 => csi_tilde(24),
        _ => function_key_xterm(n),
    }
}

/// The terminal flavor a function key is encoded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKeyConvention {
    Linux,
    Xterm,
}

fn keypad(key: KeypadKey, modes: &EncoderModes) -> Encoded {
    if modes.arrow == ArrowKeyMode::Vt52 {
        let final_byte = match key {
            KeypadKey::Digit(d) => b'0' + d,
            KeypadKey::Plus => b'l',
            KeypadKey::Minus => b'm',
            KeypadKey::Comma => b'n',
            KeypadKey::Period => b'm',
            KeypadKey::Enter => b'M',
            KeypadKey::Pf(n) => return from_bytes(&[0x1b, b'P' + (n.saturating_sub(1))]),
        };
        return if modes.keypad == KeypadMode::Application {
            from_bytes(&[0x1b, b'?', final_byte])
        } else {
            from_bytes(&[final_byte])
        };
    }

    if modes.keypad == KeypadMode::Numeric {
        return match key {
            KeypadKey::Digit(d) => from_bytes(&[b'0' + d]),
            KeypadKey::Plus => from_bytes(b"+"),
            KeypadKey::Minus => from_bytes(b"-"),
            KeypadKey::Comma => from_bytes(b","),
            KeypadKey::Period => from_bytes(b"."),
            KeypadKey::Enter => from_bytes(if modes.crlf { b"\r\n" } else { b"\r" }),
            KeypadKey::Pf(n) => from_bytes(&[0x1b, b'O', b'P' + n.saturating_sub(1)]),
        };
    }

    let final_byte = match key {
        KeypadKey::Digit(d) => b'p' + d,
        KeypadKey::Plus => b'l',
        KeypadKey::Minus => b'm',
        KeypadKey::Comma => b'l',
        KeypadKey::Period => b'n',
        KeypadKey::Enter => b'M',
        KeypadKey::Pf(n) => b'P' + n.saturating_sub(1),
    };
    from_bytes(&[0x1b, b'O', final_byte])
}

pub fn encode(key: Key, modes: &EncoderModes, functions: FunctionKeyConvention) -> Encoded {
    match key {
        Key::Up => arrow(modes, b'A'),
        Key::Down => arrow(modes, b'B'),
        Key::Right => arrow(modes, b'C'),
        Key::Left => arrow(modes, b'D'),
        Key::Home => {
            if modes.arrow == ArrowKeyMode::Vt52 {
                from_bytes(&[0x1b, b'H'])
            } else {
                csi_tilde(1)
            }
        }
        Key::End => {
            if modes.arrow == ArrowKeyMode::Vt52 {
                from_bytes(&[0x1b, b'F'])
            } else {
                csi_tilde(4)
            }
        }
        Key::PageUp => csi_tilde(5),
        Key::PageDown => csi_tilde(6),
        Key::Insert => csi_tilde(2),
        Key::Delete => csi_tilde(3),
        Key::Function(n) => match functions {
            FunctionKeyConvention::Linux => function_key_linux(n),
            FunctionKeyConvention::Xterm => function_key_xterm(n),
        },
        Key::Keypad(k) => keypad(k, modes),
        Key::Enter => from_bytes(if modes.crlf { b"\r\n" } else { b"\r" }),
        Key::Backspace => match modes.backspace {
            BackspaceMode::Soft => from_bytes(&[0x08]),
            BackspaceMode::Hard => from_bytes(&[0x7f]),
        },
        Key::Tab => from_bytes(&[0x09]),
        Key::BackTab => from_bytes(&[0x1b, b'[', b'Z']),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_up_ansi_mode() {
        let modes = EncoderModes::default();
        assert_eq!(encode(Key::Up, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![0x1b, b'[', b'A']);
    }

    #[test]
    fn arrow_up_vt100_application_mode() {
        let modes = EncoderModes { arrow: ArrowKeyMode::Vt100, ..EncoderModes::default() };
        assert_eq!(encode(Key::Up, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![0x1b, b'O', b'A']);
    }

    #[test]
    fn arrow_up_vt52_mode() {
        let modes = EncoderModes { arrow: ArrowKeyMode::Vt52, ..EncoderModes::default() };
        assert_eq!(encode(Key::Up, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![0x1b, b'A']);
    }

    #[test]
    fn f1_xterm_uses_ss3() {
        let modes = EncoderModes::default();
        assert_eq!(
            encode(Key::Function(1), &modes, FunctionKeyConvention::Xterm).to_vec(),
            vec![0x1b, b'O', b'P']
        );
    }

    #[test]
    fn f1_linux_uses_csi_bracket() {
        let modes = EncoderModes::default();
        assert_eq!(
            encode(Key::Function(1), &modes, FunctionKeyConvention::Linux).to_vec(),
            vec![0x1b, b'[', b'[', b'A']
        );
    }

    #[test]
    fn f12_xterm_csi_tilde_24() {
        let modes = EncoderModes::default();
        assert_eq!(
            encode(Key::Function(12), &modes, FunctionKeyConvention::Xterm).to_vec(),
            b"\x1b[24~".to_vec()
        );
    }

    #[test]
    fn enter_plain_sends_cr() {
        let modes = EncoderModes::default();
        assert_eq!(encode(Key::Enter, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![b'\r']);
    }

    #[test]
    fn enter_crlf_mode_sends_cr_lf() {
        let modes = EncoderModes { crlf: true, ..EncoderModes::default() };
        assert_eq!(encode(Key::Enter, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![b'\r', b'\n']);
    }

    #[test]
    fn keypad_digit_numeric_mode() {
        let modes = EncoderModes::default();
        assert_eq!(
            encode(Key::Keypad(KeypadKey::Digit(5)), &modes, FunctionKeyConvention::Xterm).to_vec(),
            vec![b'5']
        );
    }

    #[test]
    fn keypad_digit_application_mode() {
        let modes = EncoderModes { keypad: KeypadMode::Application, ..EncoderModes::default() };
        assert_eq!(
            encode(Key::Keypad(KeypadKey::Digit(5)), &modes, FunctionKeyConvention::Xterm).to_vec(),
            vec![0x1b, b'O', b'u']
        );
    }

    #[test]
    fn keypad_digit_vt52_application_mode() {
        let modes = EncoderModes {
            arrow: ArrowKeyMode::Vt52,
            keypad: KeypadMode::Application,
            ..EncoderModes::default()
        };
        assert_eq!(
            encode(Key::Keypad(KeypadKey::Digit(5)), &modes, FunctionKeyConvention::Xterm).to_vec(),
            vec![0x1b, b'?', b'5']
        );
    }

    #[test]
    fn backspace_soft_sends_bs() {
        let modes = EncoderModes::default();
        assert_eq!(encode(Key::Backspace, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![0x08]);
    }

    #[test]
    fn backspace_hard_sends_del() {
        let modes = EncoderModes { backspace: BackspaceMode::Hard, ..EncoderModes::default() };
        assert_eq!(encode(Key::Backspace, &modes, FunctionKeyConvention::Xterm).to_vec(), vec![0x7f]);
    }

    #[test]
    fn back_tab_sends_csi_z() {
        let modes = EncoderModes::default();
        assert_eq!(
            encode(Key::BackTab, &modes, FunctionKeyConvention::Xterm).to_vec(),
            vec![0x1b, b'[', b'Z']
        );
    }
}
