//! Tests for layout detection, row normalization and portfolio parsing.

#[cfg(test)]
mod tests {
    use crate::constants::{BLANK_CELL_SENTINEL, DEFAULT_CURRENCY};
    use crate::errors::Error;
    use crate::holdings::HoldingKey;
    use crate::parser::{
        ColumnLayout, ColumnLabels, ParserConfig, PortfolioParser, Publisher, RowNormalizer,
    };
    use crate::spreadsheet::{Cell, GridSheet, RowSource, SheetRow, SpreadsheetFormat};
    use rust_decimal_macros::dec;

    const HEADER_ROW: usize = 10;

    fn header() -> Vec<Cell> {
        vec![
            Cell::Empty,
            Cell::from("שם המנפיק/שם נייר ערך"),
            Cell::from("מספר ני\"ע"),
            Cell::from("זירת מסחר"),
            Cell::from("מספר מנפיק"),
            Cell::from("ענף מסחר"),
            Cell::from("סוג מטבע"),
            Cell::from("ערך נקוב"),
            Cell::from("שער"),
            Cell::from("שווי שוק (אלפי ש\"ח)"),
        ]
    }

    fn data_row(name: &str, issuer_id: Cell, currency: &str, nominal: f64, fair: f64) -> Vec<Cell> {
        vec![
            Cell::Empty,
            Cell::from(name),
            Cell::from("1234567"),
            Cell::from("TASE"),
            issuer_id,
            Cell::from("Banks"),
            Cell::from(currency),
            Cell::Number(nominal),
            Cell::Number(150.0),
            Cell::Number(fair),
        ]
    }

    /// A sheet laid out like the publishers' reports: title rows, a header
    /// row at index 10, data from index 12.
    fn sheet_with(rows: Vec<Vec<Cell>>) -> GridSheet {
        let mut sheet = GridSheet::default();
        sheet.push_row(vec![Cell::Empty, Cell::from("פרטי נכסים")]);
        for _ in 1..HEADER_ROW {
            sheet.push_row(Vec::new());
        }
        sheet.push_row(header());
        sheet.push_row(vec![Cell::Empty, Cell::from("(1)"), Cell::from("(2)")]);
        for row in rows {
            sheet.push_row(row);
        }
        sheet
    }

    fn quarter_sheet() -> GridSheet {
        sheet_with(vec![
            data_row("לאומי", Cell::from(" 520018078 "), "שקל חדש", 100.0, 1.5),
            data_row("סה\"כ בנקים", Cell::Empty, "", 100.0, 1.5),
            data_row("לאומי", Cell::Number(520018078.0), "שקל חדש", 50.0, 0.75),
            data_row("טבע", Cell::from("520013954"), "דולר אמריקאי", 20.0, 0.2),
            data_row("placeholder", Cell::from(BLANK_CELL_SENTINEL), "שקל חדש", 999.0, 9.0),
            data_row("טבע", Cell::from("520013954"), "שקל חדש", 10.0, 0.1),
        ])
    }

    // ==================== Layout detection ====================

    #[test]
    fn test_detect_layout_from_header() {
        let layout = ColumnLayout::detect(&header(), &ColumnLabels::default()).unwrap();

        assert_eq!(
            layout,
            ColumnLayout {
                issuer_id: 4,
                nominal_value: 7,
                issuer_name: Some(1),
                category: Some(5),
                currency: Some(6),
                share_value: Some(8),
                fair_value: Some(9),
            }
        );
    }

    #[test]
    fn test_detect_layout_missing_required_column() {
        let mut header = header();
        header[7] = Cell::from("something else");

        match ColumnLayout::detect(&header, &ColumnLabels::default()) {
            Err(Error::HeaderNotFound { field, .. }) => assert_eq!(field, "nominal_value"),
            other => panic!("expected HeaderNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_detect_layout_optional_columns_absent() {
        let header = vec![Cell::from("מספר מנפיק"), Cell::from("ערך נקוב")];
        let layout = ColumnLayout::detect(&header, &ColumnLabels::default()).unwrap();

        assert_eq!(layout.issuer_id, 0);
        assert_eq!(layout.nominal_value, 1);
        assert_eq!(layout.currency, None);
        assert_eq!(layout.fair_value, None);
    }

    // ==================== Row normalizer ====================

    fn normalizer() -> RowNormalizer {
        let layout = ColumnLayout::detect(&header(), &ColumnLabels::default()).unwrap();
        RowNormalizer::new(layout, &ParserConfig::default())
    }

    #[test]
    fn test_normalize_row() {
        let row = SheetRow::new(
            12,
            data_row("לאומי", Cell::from("  520018078\t"), "שקל חדש", 100.456, 1.2345),
        );

        let record = normalizer().normalize(&row).unwrap();

        assert_eq!(record.issuer_id, "520018078");
        assert_eq!(record.issuer_name, "לאומי");
        assert_eq!(record.category, "Banks");
        assert_eq!(record.currency, "שקל חדש");
        assert_eq!(record.nominal_value, dec!(100.46));
        assert_eq!(record.share_value, Some(dec!(150)));
        assert_eq!(record.fair_value, Some(dec!(1234.50)));
    }

    #[test]
    fn test_normalize_numeric_issuer_id() {
        let row = SheetRow::new(12, data_row("x", Cell::Number(520018078.0), "NIS", 1.0, 0.0));
        assert_eq!(normalizer().issuer_id(&row), "520018078");
    }

    #[test]
    fn test_blank_sentinel_issuer_id_is_empty() {
        let row = SheetRow::new(
            12,
            data_row("x", Cell::from(format!(" {} ", BLANK_CELL_SENTINEL)), "NIS", 1.0, 0.0),
        );

        let normalizer = normalizer();
        assert_eq!(normalizer.issuer_id(&row), "");
        assert!(!normalizer.has_issuer_id(&row));
    }

    #[test]
    fn test_normalize_parses_textual_numbers() {
        let mut cells = data_row("x", Cell::from("1"), "NIS", 0.0, 0.0);
        cells[7] = Cell::from(" 1,234.567 ");
        cells[8] = Cell::Empty;
        cells[9] = Cell::from("1.5E1");

        let record = normalizer().normalize(&SheetRow::new(20, cells)).unwrap();

        assert_eq!(record.nominal_value, dec!(1234.57));
        assert_eq!(record.share_value, None);
        assert_eq!(record.fair_value, Some(dec!(15000)));
    }

    #[test]
    fn test_normalize_empty_nominal_is_zero_and_empty_currency_defaults() {
        let mut cells = data_row("x", Cell::from("1"), "", 0.0, 0.0);
        cells[7] = Cell::Empty;

        let record = normalizer().normalize(&SheetRow::new(20, cells)).unwrap();

        assert_eq!(record.nominal_value, dec!(0));
        assert_eq!(record.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_normalize_rejects_malformed_number() {
        let mut cells = data_row("x", Cell::from("1"), "NIS", 0.0, 0.0);
        cells[7] = Cell::from("n/a");

        match normalizer().normalize(&SheetRow::new(33, cells)) {
            Err(Error::InvalidNumber { row, column, value }) => {
                assert_eq!(row, 33);
                assert_eq!(column, 7);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_scaled_fair_value_out_of_range_is_invalid() {
        let mut cells = data_row("x", Cell::from("1"), "NIS", 1.0, 0.0);
        cells[9] = Cell::from("1e27");

        match normalizer().normalize(&SheetRow::new(40, cells)) {
            Err(Error::InvalidNumber { row, column, value }) => {
                assert_eq!(row, 40);
                assert_eq!(column, 9);
                assert_eq!(value, "1e27");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_fair_value_multiplier_is_configurable() {
        let layout = ColumnLayout::detect(&header(), &ColumnLabels::default()).unwrap();
        let config = ParserConfig {
            fair_value_multiplier: dec!(1),
            ..Default::default()
        };
        let row = SheetRow::new(12, data_row("x", Cell::from("1"), "NIS", 1.0, 2.5));

        let record = RowNormalizer::new(layout, &config).normalize(&row).unwrap();
        assert_eq!(record.fair_value, Some(dec!(2.5)));
    }

    // ==================== Portfolio parser ====================

    #[test]
    fn test_parser_skips_rows_without_issuer_id() {
        let parser =
            PortfolioParser::from_source(quarter_sheet(), &ParserConfig::default()).unwrap();
        assert_eq!(parser.first_data_row(), 12);

        let records: Vec<_> = parser.holdings().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| !r.issuer_id.is_empty()));
        assert!(records.iter().all(|r| r.issuer_name != "placeholder"));
    }

    #[test]
    fn test_parser_aggregates_per_issuer_and_currency() {
        let portfolio = PortfolioParser::from_source(quarter_sheet(), &ParserConfig::default())
            .unwrap()
            .into_portfolio()
            .unwrap();

        assert_eq!(portfolio.len(), 3);

        let leumi = portfolio
            .get(&HoldingKey::new("520018078", "שקל חדש"))
            .unwrap();
        assert_eq!(leumi.nominal_value, dec!(150));
        assert_eq!(leumi.fair_value, Some(dec!(2250)));

        assert!(portfolio.contains_key(&HoldingKey::new("520013954", "דולר אמריקאי")));
        assert!(portfolio.contains_key(&HoldingKey::new("520013954", "שקל חדש")));
    }

    #[test]
    fn test_data_starts_after_header_when_header_is_low() {
        let config = ParserConfig {
            first_data_row: 2,
            ..Default::default()
        };
        let parser = PortfolioParser::from_source(quarter_sheet(), &config).unwrap();

        assert_eq!(parser.first_data_row(), HEADER_ROW as u32 + 1);
        assert_eq!(parser.holdings().count(), 4);
    }

    #[test]
    fn test_parser_fails_without_header() {
        let sheet = GridSheet::from_text(&[&["nothing"], &["to see"]]);

        assert!(matches!(
            PortfolioParser::from_source(sheet, &ParserConfig::default()),
            Err(Error::HeaderNotFound { .. })
        ));
    }

    #[test]
    fn test_parser_propagates_invalid_number() {
        let mut bad = data_row("x", Cell::from("1"), "NIS", 0.0, 0.0);
        bad[7] = Cell::Bool(true);
        let sheet = sheet_with(vec![bad]);

        let result = PortfolioParser::from_source(sheet, &ParserConfig::default())
            .unwrap()
            .into_portfolio();
        assert!(matches!(result, Err(Error::InvalidNumber { row: 12, .. })));
    }

    #[test]
    fn test_preset_layout_without_currency_column() {
        // Phoenix: issuer id in column 5, nominal value in column 8, data from row 13.
        let mut sheet = GridSheet::default();
        for _ in 0..13 {
            sheet.push_row(Vec::new());
        }
        let mut row = vec![Cell::Empty; 9];
        row[5] = Cell::from("520000118");
        row[8] = Cell::Number(42.0);
        sheet.push_row(row.clone());
        sheet.push_row(row);

        let config = ParserConfig::default().with_publisher(Some(Publisher::Phoenix));
        let portfolio = PortfolioParser::from_source(sheet, &config)
            .unwrap()
            .into_portfolio()
            .unwrap();

        let holding = portfolio
            .get(&HoldingKey::new("520000118", DEFAULT_CURRENCY))
            .unwrap();
        assert_eq!(holding.nominal_value, dec!(84));
        assert_eq!(holding.issuer_name, "");
    }

    /// In-memory sheet that reports itself as read from an `.xlsx` file.
    struct XlsxGrid(GridSheet);

    impl RowSource for XlsxGrid {
        fn row_count(&self) -> u32 {
            self.0.row_count()
        }

        fn row(&self, index: u32) -> Vec<Cell> {
            self.0.row(index)
        }

        fn format(&self) -> Option<SpreadsheetFormat> {
            Some(SpreadsheetFormat::Xlsx)
        }
    }

    /// Phoenix layout with one holding on row 12 and another on row 13.
    fn phoenix_sheet() -> GridSheet {
        let mut sheet = GridSheet::default();
        for _ in 0..12 {
            sheet.push_row(Vec::new());
        }
        for nominal in [42.0, 8.0] {
            let mut row = vec![Cell::Empty; 9];
            row[5] = Cell::from("520000118");
            row[8] = Cell::Number(nominal);
            sheet.push_row(row);
        }
        sheet
    }

    #[test]
    fn test_preset_first_row_depends_on_format() {
        let menora = Publisher::Menora.preset();
        assert_eq!(menora.first_data_row(None), 13);
        assert_eq!(menora.first_data_row(Some(SpreadsheetFormat::Xls)), 13);
        assert_eq!(menora.first_data_row(Some(SpreadsheetFormat::Xlsx)), 12);

        let altshuler = Publisher::Altshuler.preset();
        assert_eq!(altshuler.first_data_row(Some(SpreadsheetFormat::Xls)), 12);
        assert_eq!(altshuler.first_data_row(Some(SpreadsheetFormat::Xlsx)), 11);
    }

    #[test]
    fn test_xlsx_preset_starts_one_row_earlier() {
        let config = ParserConfig::default().with_publisher(Some(Publisher::Phoenix));
        let key = HoldingKey::new("520000118", DEFAULT_CURRENCY);

        let xls = PortfolioParser::from_source(phoenix_sheet(), &config).unwrap();
        assert_eq!(xls.first_data_row(), 13);
        let xls = xls.into_portfolio().unwrap();
        assert_eq!(xls.get(&key).unwrap().nominal_value, dec!(8));

        let xlsx = PortfolioParser::from_source(XlsxGrid(phoenix_sheet()), &config).unwrap();
        assert_eq!(xlsx.first_data_row(), 12);
        let xlsx = xlsx.into_portfolio().unwrap();
        assert_eq!(xlsx.get(&key).unwrap().nominal_value, dec!(50));
    }

    // ==================== Configuration ====================

    #[test]
    fn test_config_from_json_fills_defaults() {
        let config = ParserConfig::from_json(
            r#"{"sheetName": "לא סחיר - מניות", "firstDataRow": 14, "layout": "harel"}"#,
        )
        .unwrap();

        assert_eq!(config.sheet_name, "לא סחיר - מניות");
        assert_eq!(config.first_data_row, 14);
        assert_eq!(config.publisher, Some(Publisher::Harel));
        assert_eq!(config.effective_sheet_name(), "מניות");
        assert_eq!(config.column_labels, ColumnLabels::default());
        assert_eq!(config.fair_value_multiplier, dec!(1000));
    }

    #[test]
    fn test_config_layout_key() {
        let detect = ParserConfig::from_json(r#"{"layout": "detect"}"#).unwrap();
        assert_eq!(detect.publisher, None);

        let phoenix = ParserConfig::from_json(r#"{"layout": "Phoenix"}"#).unwrap();
        assert_eq!(phoenix.publisher, Some(Publisher::Phoenix));

        assert!(matches!(
            ParserConfig::from_json(r#"{"layout": "clal"}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_config_serializes_layout_key() {
        let config = ParserConfig::default().with_publisher(Some(Publisher::Harel));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["layout"], "harel");

        let json = serde_json::to_value(ParserConfig::default()).unwrap();
        assert_eq!(json["layout"], "detect");
        assert!(json.get("publisher").is_none());
    }

    #[test]
    fn test_config_rejects_empty_markers() {
        assert!(matches!(
            ParserConfig::from_json(r#"{"headerMarkers": []}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ParserConfig::from_json("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_publisher_from_str() {
        assert_eq!("Menora".parse::<Publisher>().unwrap(), Publisher::Menora);
        assert_eq!(" altshuler ".parse::<Publisher>().unwrap(), Publisher::Altshuler);
        assert!("clal".parse::<Publisher>().is_err());
        assert_eq!(Publisher::Altshuler.preset().sheet_name, "לא סחיר - מניות");
    }
}
