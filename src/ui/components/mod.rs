pub mod kpi_card;
pub mod profit_indicator;
pub mod scan_panel;
pub mod toast;
