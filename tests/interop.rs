//! Feature-gated conversions and serialization.

#[cfg(feature = "anyhow")]
mod anyhow_interop {
    use try_catch_chain::{protect, throw, Error};

    #[test]
    fn anyhow_error_keeps_message_and_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let report = anyhow::Error::new(inner).context("sending frame");
        let err = protect(|| throw(Error::from_anyhow(report))).unwrap_err();

        assert_eq!(err.to_string(), "sending frame");
        assert!(err.find::<std::io::Error>().is_some());
    }
}

#[cfg(feature = "eyre")]
mod eyre_interop {
    use try_catch_chain::Error;

    #[test]
    fn eyre_report_converts() {
        let err = Error::from_eyre(eyre::eyre!("broken pipe"));
        assert_eq!(err.to_string(), "broken pipe");
    }
}

#[cfg(feature = "serde")]
mod serde_interop {
    use try_catch_chain::{protect, Error};

    #[test]
    fn serializes_message_and_causes() {
        let root = Error::msg("disk full");
        let err = root.context("writing block").context("saving file");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "message": "saving file: writing block: disk full",
                "causes": ["writing block: disk full", "disk full"],
            })
        );
    }

    #[test]
    fn serializes_panic_error() {
        let err = protect(|| panic!("boom")).unwrap_err();
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"message":"panic: boom","causes":[]}"#);
    }
}
