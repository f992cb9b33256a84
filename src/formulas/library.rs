//! Financial Formula Library
//!
//! Plain numeric implementations of the formulas served by the API, plus the
//! [`StandardFormulas`] source that registers them under their canonical names.
//!
//! Rates are decimal fractions (`0.05` for 5%) and periods are counts of
//! compounding periods. Formulas follow IEEE arithmetic: a zero divisor or a
//! logarithm of a non-positive number yields a non-finite value, which the
//! dispatcher reports as a failed invocation.

use super::{CatalogueError, Formula, FormulaEntry, FormulaSource};

// ──────────────────────────────────────────────────────────────────────────────
// GENERAL FINANCE
// ──────────────────────────────────────────────────────────────────────────────

/// Assets = Liabilities + Equity
pub fn assets(liabilities: f64, equity: f64) -> f64 {
    liabilities + equity
}

/// Liabilities = Assets - Equity
pub fn liabilities(assets: f64, equity: f64) -> f64 {
    assets - equity
}

/// Equity = Assets - Liabilities
pub fn equity(assets: f64, liabilities: f64) -> f64 {
    assets - liabilities
}

pub fn future_value(cash_flow: f64, rate: f64, periods: f64) -> f64 {
    cash_flow * (1.0 + rate).powf(periods)
}

pub fn present_value(cash_flow: f64, rate: f64, periods: f64) -> f64 {
    cash_flow / (1.0 + rate).powf(periods)
}

/// Present value factor for one unit received after `periods`
pub fn present_value_factor(rate: f64, periods: f64) -> f64 {
    1.0 / (1.0 + rate).powf(periods)
}

pub fn future_value_factor(rate: f64, periods: f64) -> f64 {
    (1.0 + rate).powf(periods)
}

pub fn future_value_continuous_compounding(cash_flow: f64, rate: f64, time: f64) -> f64 {
    cash_flow * (rate * time).exp()
}

pub fn present_value_continuous_compounding(cash_flow: f64, rate: f64, time: f64) -> f64 {
    cash_flow / (rate * time).exp()
}

/// Number of periods for a value to double at the given rate
pub fn doubling_time(rate: f64) -> f64 {
    2f64.ln() / (1.0 + rate).ln()
}

pub fn doubling_time_continuous_compounding(rate: f64) -> f64 {
    2f64.ln() / rate
}

/// Rule of 72 approximation of the doubling time; `rate` is a percentage here.
pub fn rule_of_72(rate: f64) -> f64 {
    72.0 / rate
}

pub fn perpetuity(dividend: f64, discount_rate: f64) -> f64 {
    dividend / discount_rate
}

pub fn growing_perpetuity(dividend: f64, discount_rate: f64, growth_rate: f64) -> f64 {
    dividend / (discount_rate - growth_rate)
}

/// Present value of an ordinary annuity
pub fn annuity_present_value(payment: f64, rate: f64, periods: f64) -> f64 {
    payment * (1.0 - (1.0 + rate).powf(-periods)) / rate
}

/// Future value of an ordinary annuity
pub fn annuity_future_value(payment: f64, rate: f64, periods: f64) -> f64 {
    payment * ((1.0 + rate).powf(periods) - 1.0) / rate
}

pub fn annuity_due_present_value(payment: f64, rate: f64, periods: f64) -> f64 {
    annuity_present_value(payment, rate, periods) * (1.0 + rate)
}

pub fn annuity_due_future_value(payment: f64, rate: f64, periods: f64) -> f64 {
    annuity_future_value(payment, rate, periods) * (1.0 + rate)
}

/// Payment of an annuity with the given present value
pub fn annuity_payment_from_present_value(present_value: f64, rate: f64, periods: f64) -> f64 {
    present_value * rate / (1.0 - (1.0 + rate).powf(-periods))
}

/// Payment of an annuity reaching the given future value
pub fn annuity_payment_from_future_value(future_value: f64, rate: f64, periods: f64) -> f64 {
    future_value * rate / ((1.0 + rate).powf(periods) - 1.0)
}

pub fn growing_annuity_present_value(payment: f64, rate: f64, growth_rate: f64, periods: f64) -> f64 {
    payment / (rate - growth_rate) * (1.0 - ((1.0 + growth_rate) / (1.0 + rate)).powf(periods))
}

pub fn growing_annuity_future_value(payment: f64, rate: f64, growth_rate: f64, periods: f64) -> f64 {
    payment * ((1.0 + rate).powf(periods) - (1.0 + growth_rate).powf(periods)) / (rate - growth_rate)
}

/// Number of periods needed for `present_value` to grow into `future_value`
pub fn number_of_periods(present_value: f64, future_value: f64, rate: f64) -> f64 {
    (future_value / present_value).ln() / (1.0 + rate).ln()
}

/// Nominal rate adjusted for inflation (Fisher equation)
pub fn real_rate_of_return(nominal_rate: f64, inflation_rate: f64) -> f64 {
    (1.0 + nominal_rate) / (1.0 + inflation_rate) - 1.0
}

pub fn weighted_average(value_a: f64, weight_a: f64, value_b: f64, weight_b: f64) -> f64 {
    (value_a * weight_a + value_b * weight_b) / (weight_a + weight_b)
}

// ──────────────────────────────────────────────────────────────────────────────
// BANKING
// ──────────────────────────────────────────────────────────────────────────────

pub fn annual_percentage_yield(stated_rate: f64, compounding_periods: f64) -> f64 {
    (1.0 + stated_rate / compounding_periods).powf(compounding_periods) - 1.0
}

pub fn continuous_compounding(principal: f64, rate: f64, time: f64) -> f64 {
    principal * (rate * time).exp()
}

pub fn compound_interest(principal: f64, rate: f64, periods: f64) -> f64 {
    principal * ((1.0 + rate).powf(periods) - 1.0)
}

pub fn simple_interest(principal: f64, rate: f64, time: f64) -> f64 {
    principal * rate * time
}

pub fn simple_interest_rate(interest: f64, principal: f64, time: f64) -> f64 {
    interest / (principal * time)
}

pub fn simple_interest_principal(interest: f64, rate: f64, time: f64) -> f64 {
    interest / (rate * time)
}

pub fn simple_interest_time(interest: f64, principal: f64, rate: f64) -> f64 {
    interest / (principal * rate)
}

/// Periodic payment of an amortized loan
pub fn loan_payment(present_value: f64, rate: f64, periods: f64) -> f64 {
    annuity_payment_from_present_value(present_value, rate, periods)
}

/// Balance still owed after `periods_paid` payments of `payment`
pub fn remaining_balance_on_loan(present_value: f64, payment: f64, rate: f64, periods_paid: f64) -> f64 {
    let growth = (1.0 + rate).powf(periods_paid);
    present_value * growth - payment * (growth - 1.0) / rate
}

/// Balloon payment due at the end of `periods`
pub fn balloon_balance_of_loan(present_value: f64, rate: f64, periods: f64, payment: f64) -> f64 {
    remaining_balance_on_loan(present_value, payment, rate, periods)
}

pub fn debt_to_income_ratio(monthly_debt_payments: f64, gross_monthly_income: f64) -> f64 {
    monthly_debt_payments / gross_monthly_income
}

pub fn loan_to_deposit_ratio(loans: f64, deposits: f64) -> f64 {
    loans / deposits
}

pub fn loan_to_value_ratio(loan_amount: f64, property_value: f64) -> f64 {
    loan_amount / property_value
}

// ──────────────────────────────────────────────────────────────────────────────
// CORPORATE RATIOS
// ──────────────────────────────────────────────────────────────────────────────

pub fn current_ratio(current_assets: f64, current_liabilities: f64) -> f64 {
    current_assets / current_liabilities
}

pub fn quick_ratio(current_assets: f64, inventories: f64, current_liabilities: f64) -> f64 {
    (current_assets - inventories) / current_liabilities
}

pub fn cash_ratio(cash: f64, marketable_securities: f64, current_liabilities: f64) -> f64 {
    (cash + marketable_securities) / current_liabilities
}

pub fn working_capital(current_assets: f64, current_liabilities: f64) -> f64 {
    current_assets - current_liabilities
}

pub fn debt_ratio(total_liabilities: f64, total_assets: f64) -> f64 {
    total_liabilities / total_assets
}

pub fn debt_to_equity_ratio(total_liabilities: f64, total_equity: f64) -> f64 {
    total_liabilities / total_equity
}

pub fn equity_multiplier(total_assets: f64, total_equity: f64) -> f64 {
    total_assets / total_equity
}

pub fn interest_coverage_ratio(ebit: f64, interest_expense: f64) -> f64 {
    ebit / interest_expense
}

pub fn return_on_assets(net_income: f64, total_assets: f64) -> f64 {
    net_income / total_assets
}

pub fn return_on_equity(net_income: f64, average_equity: f64) -> f64 {
    net_income / average_equity
}

/// DuPont decomposition of return on equity: margin x turnover x leverage
pub fn du_pont_analysis(net_income: f64, revenue: f64, total_assets: f64, total_equity: f64) -> f64 {
    (net_income / revenue) * (revenue / total_assets) * (total_assets / total_equity)
}

pub fn return_on_investment(earnings: f64, initial_investment: f64) -> f64 {
    (earnings - initial_investment) / initial_investment
}

pub fn net_profit_margin(net_income: f64, revenue: f64) -> f64 {
    net_income / revenue
}

pub fn gross_profit_margin(revenue: f64, cost_of_goods_sold: f64) -> f64 {
    (revenue - cost_of_goods_sold) / revenue
}

pub fn operating_margin(operating_income: f64, revenue: f64) -> f64 {
    operating_income / revenue
}

pub fn asset_turnover_ratio(revenue: f64, average_total_assets: f64) -> f64 {
    revenue / average_total_assets
}

pub fn inventory_turnover_ratio(cost_of_goods_sold: f64, average_inventory: f64) -> f64 {
    cost_of_goods_sold / average_inventory
}

pub fn days_in_inventory(inventory_turnover: f64) -> f64 {
    365.0 / inventory_turnover
}

pub fn receivables_turnover_ratio(revenue: f64, average_receivables: f64) -> f64 {
    revenue / average_receivables
}

pub fn average_collection_period(receivables_turnover: f64) -> f64 {
    365.0 / receivables_turnover
}

/// Units to sell before fixed costs are covered
pub fn break_even_point(fixed_costs: f64, sales_price_per_unit: f64, variable_cost_per_unit: f64) -> f64 {
    fixed_costs / (sales_price_per_unit - variable_cost_per_unit)
}

pub fn contribution_margin(revenue: f64, variable_costs: f64) -> f64 {
    revenue - variable_costs
}

pub fn retention_ratio(net_income: f64, dividends: f64) -> f64 {
    (net_income - dividends) / net_income
}

// ──────────────────────────────────────────────────────────────────────────────
// STOCKS & BONDS
// ──────────────────────────────────────────────────────────────────────────────

pub fn earnings_per_share(net_income: f64, preferred_dividends: f64, shares_outstanding: f64) -> f64 {
    (net_income - preferred_dividends) / shares_outstanding
}

pub fn price_to_earnings_ratio(price_per_share: f64, earnings_per_share: f64) -> f64 {
    price_per_share / earnings_per_share
}

pub fn price_to_book_ratio(price_per_share: f64, book_value_per_share: f64) -> f64 {
    price_per_share / book_value_per_share
}

pub fn book_value_per_share(total_equity: f64, preferred_equity: f64, shares_outstanding: f64) -> f64 {
    (total_equity - preferred_equity) / shares_outstanding
}

pub fn dividend_yield(dividends_per_share: f64, price_per_share: f64) -> f64 {
    dividends_per_share / price_per_share
}

pub fn dividend_payout_ratio(dividends: f64, net_income: f64) -> f64 {
    dividends / net_income
}

pub fn capital_gains_yield(initial_price: f64, final_price: f64) -> f64 {
    (final_price - initial_price) / initial_price
}

pub fn total_stock_return(initial_price: f64, final_price: f64, dividends: f64) -> f64 {
    (final_price - initial_price + dividends) / initial_price
}

pub fn holding_period_return(initial_value: f64, final_value: f64, income: f64) -> f64 {
    total_stock_return(initial_value, final_value, income)
}

/// Geometric mean return over `periods` given the total growth factor
pub fn geometric_mean_return(total_growth_factor: f64, periods: f64) -> f64 {
    total_growth_factor.powf(1.0 / periods) - 1.0
}

/// Gordon growth model: price of a stock with constant dividend growth
pub fn stock_present_value_constant_growth(next_dividend: f64, required_return: f64, growth_rate: f64) -> f64 {
    next_dividend / (required_return - growth_rate)
}

pub fn stock_present_value_zero_growth(dividend: f64, required_return: f64) -> f64 {
    dividend / required_return
}

pub fn capital_asset_pricing_model(risk_free_rate: f64, beta: f64, market_return: f64) -> f64 {
    risk_free_rate + beta * (market_return - risk_free_rate)
}

pub fn current_yield(annual_coupon: f64, bond_price: f64) -> f64 {
    annual_coupon / bond_price
}

pub fn bond_equivalent_yield(face_value: f64, bond_price: f64, days_to_maturity: f64) -> f64 {
    (face_value - bond_price) / bond_price * (365.0 / days_to_maturity)
}

pub fn zero_coupon_bond_value(face_value: f64, rate: f64, periods: f64) -> f64 {
    face_value / (1.0 + rate).powf(periods)
}

pub fn zero_coupon_bond_yield(face_value: f64, present_value: f64, periods: f64) -> f64 {
    (face_value / present_value).powf(1.0 / periods) - 1.0
}

/// Price of a bond paying `coupon` per period plus `face_value` at maturity
pub fn bond_price(face_value: f64, coupon: f64, rate: f64, periods: f64) -> f64 {
    annuity_present_value(coupon, rate, periods) + zero_coupon_bond_value(face_value, rate, periods)
}

pub fn tax_equivalent_yield(tax_free_yield: f64, tax_rate: f64) -> f64 {
    tax_free_yield / (1.0 - tax_rate)
}

// ──────────────────────────────────────────────────────────────────────────────
// REGISTRATION
// ──────────────────────────────────────────────────────────────────────────────

/// The bundled formula library, registered under `Calc`-prefixed names
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormulas;

impl FormulaSource for StandardFormulas {
    fn formulas(&self) -> Result<Vec<FormulaEntry>, CatalogueError> {
        use Formula::{Binary, Quaternary, Ternary, Unary};

        let table: Vec<(&str, Formula)> = vec![
            // General finance
            ("CalcAssets", Binary(assets)),
            ("CalcLiabilities", Binary(liabilities)),
            ("CalcEquity", Binary(equity)),
            ("CalcFutureValue", Ternary(future_value)),
            ("CalcPresentValue", Ternary(present_value)),
            ("CalcPresentValueFactor", Binary(present_value_factor)),
            ("CalcFutureValueFactor", Binary(future_value_factor)),
            ("CalcFutureValueContinuousCompounding", Ternary(future_value_continuous_compounding)),
            ("CalcPresentValueContinuousCompounding", Ternary(present_value_continuous_compounding)),
            ("CalcDoublingTime", Unary(doubling_time)),
            ("CalcDoublingTimeContinuousCompounding", Unary(doubling_time_continuous_compounding)),
            ("CalcRuleOf72", Unary(rule_of_72)),
            ("CalcPerpetuity", Binary(perpetuity)),
            ("CalcGrowingPerpetuity", Ternary(growing_perpetuity)),
            ("CalcAnnuityPresentValue", Ternary(annuity_present_value)),
            ("CalcAnnuityFutureValue", Ternary(annuity_future_value)),
            ("CalcAnnuityDuePresentValue", Ternary(annuity_due_present_value)),
            ("CalcAnnuityDueFutureValue", Ternary(annuity_due_future_value)),
            ("CalcAnnuityPaymentPV", Ternary(annuity_payment_from_present_value)),
            ("CalcAnnuityPaymentFV", Ternary(annuity_payment_from_future_value)),
            ("CalcGrowingAnnuityPresentValue", Quaternary(growing_annuity_present_value)),
            ("CalcGrowingAnnuityFutureValue", Quaternary(growing_annuity_future_value)),
            ("CalcNumberOfPeriods", Ternary(number_of_periods)),
            ("CalcRealRateOfReturn", Binary(real_rate_of_return)),
            ("CalcWeightedAverage", Quaternary(weighted_average)),
            // Banking
            ("CalcAnnualPercentageYield", Binary(annual_percentage_yield)),
            ("CalcContinuousCompounding", Ternary(continuous_compounding)),
            ("CalcCompoundInterest", Ternary(compound_interest)),
            ("CalcSimpleInterest", Ternary(simple_interest)),
            ("CalcSimpleInterestRate", Ternary(simple_interest_rate)),
            ("CalcSimpleInterestPrincipal", Ternary(simple_interest_principal)),
            ("CalcSimpleInterestTime", Ternary(simple_interest_time)),
            ("CalcLoanPayment", Ternary(loan_payment)),
            ("CalcRemainingBalanceOnLoan", Quaternary(remaining_balance_on_loan)),
            ("CalcBalloonBalanceOfLoan", Quaternary(balloon_balance_of_loan)),
            ("CalcDebtToIncomeRatio", Binary(debt_to_income_ratio)),
            ("CalcLoanToDepositRatio", Binary(loan_to_deposit_ratio)),
            ("CalcLoanToValueRatio", Binary(loan_to_value_ratio)),
            // Corporate ratios
            ("CalcCurrentRatio", Binary(current_ratio)),
            ("CalcQuickRatio", Ternary(quick_ratio)),
            ("CalcCashRatio", Ternary(cash_ratio)),
            ("CalcWorkingCapital", Binary(working_capital)),
            ("CalcDebtRatio", Binary(debt_ratio)),
            ("CalcDebtToEquityRatio", Binary(debt_to_equity_ratio)),
            ("CalcEquityMultiplier", Binary(equity_multiplier)),
            ("CalcInterestCoverageRatio", Binary(interest_coverage_ratio)),
            ("CalcReturnOnAssets", Binary(return_on_assets)),
            ("CalcReturnOnEquity", Binary(return_on_equity)),
            ("CalcDuPontAnalysis", Quaternary(du_pont_analysis)),
            ("CalcReturnOnInvestment", Binary(return_on_investment)),
            ("CalcNetProfitMargin", Binary(net_profit_margin)),
            ("CalcGrossProfitMargin", Binary(gross_profit_margin)),
            ("CalcOperatingMargin", Binary(operating_margin)),
            ("CalcAssetTurnoverRatio", Binary(asset_turnover_ratio)),
            ("CalcInventoryTurnoverRatio", Binary(inventory_turnover_ratio)),
            ("CalcDaysInInventory", Unary(days_in_inventory)),
            ("CalcReceivablesTurnoverRatio", Binary(receivables_turnover_ratio)),
            ("CalcAverageCollectionPeriod", Unary(average_collection_period)),
            ("CalcBreakEvenPoint", Ternary(break_even_point)),
            ("CalcContributionMargin", Binary(contribution_margin)),
            ("CalcRetentionRatio", Binary(retention_ratio)),
            // Stocks & bonds
            ("CalcEarningsPerShare", Ternary(earnings_per_share)),
            ("CalcPriceToEarningsRatio", Binary(price_to_earnings_ratio)),
            ("CalcPriceToBookRatio", Binary(price_to_book_ratio)),
            ("CalcBookValuePerShare", Ternary(book_value_per_share)),
            ("CalcDividendYield", Binary(dividend_yield)),
            ("CalcDividendPayoutRatio", Binary(dividend_payout_ratio)),
            ("CalcCapitalGainsYield", Binary(capital_gains_yield)),
            ("CalcTotalStockReturn", Ternary(total_stock_return)),
            ("CalcHoldingPeriodReturn", Ternary(holding_period_return)),
            ("CalcGeometricMeanReturn", Binary(geometric_mean_return)),
            ("CalcStockPVConstantGrowth", Ternary(stock_present_value_constant_growth)),
            ("CalcStockPVZeroGrowth", Binary(stock_present_value_zero_growth)),
            ("CalcCapitalAssetPricingModel", Ternary(capital_asset_pricing_model)),
            ("CalcCurrentYield", Binary(current_yield)),
            ("CalcBondEquivalentYield", Ternary(bond_equivalent_yield)),
            ("CalcZeroCouponBondValue", Ternary(zero_coupon_bond_value)),
            ("CalcZeroCouponBondYield", Ternary(zero_coupon_bond_yield)),
            ("CalcBondPrice", Quaternary(bond_price)),
            ("CalcTaxEquivalentYield", Binary(tax_equivalent_yield)),
        ];

        Ok(table
            .into_iter()
            .map(|(name, formula)| FormulaEntry::new(name, formula))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_balance_sheet_identity() {
        assert_eq!(assets(10.0, 20.0), 30.0);
        assert_eq!(liabilities(30.0, 20.0), 10.0);
        assert_eq!(equity(30.0, 10.0), 20.0);
    }

    #[test]
    fn test_time_value_of_money() {
        approx(future_value(100.0, 0.1, 2.0), 121.0);
        approx(present_value(121.0, 0.1, 2.0), 100.0);
        approx(present_value_factor(0.1, 1.0) * future_value_factor(0.1, 1.0), 1.0);
        approx(doubling_time(1.0), 1.0);
        approx(rule_of_72(8.0), 9.0);
        approx(number_of_periods(100.0, 121.0, 0.1), 2.0);
    }

    #[test]
    fn test_annuities() {
        approx(annuity_future_value(100.0, 0.1, 2.0), 210.0);
        approx(annuity_due_future_value(100.0, 0.1, 2.0), 231.0);
        let pv = annuity_present_value(100.0, 0.05, 10.0);
        approx(annuity_payment_from_present_value(pv, 0.05, 10.0), 100.0);
        approx(annuity_payment_from_future_value(210.0, 0.1, 2.0), 100.0);
        approx(growing_annuity_present_value(100.0, 0.1, 0.0, 2.0), annuity_present_value(100.0, 0.1, 2.0));
    }

    #[test]
    fn test_loans() {
        let payment = loan_payment(1000.0, 0.01, 12.0);
        approx(remaining_balance_on_loan(1000.0, payment, 0.01, 12.0), 0.0);
        approx(simple_interest(1000.0, 0.05, 2.0), 100.0);
        approx(simple_interest_rate(100.0, 1000.0, 2.0), 0.05);
        approx(annual_percentage_yield(0.12, 1.0), 0.12);
    }

    #[test]
    fn test_ratios_and_markets() {
        approx(quick_ratio(200.0, 50.0, 100.0), 1.5);
        approx(du_pont_analysis(10.0, 100.0, 200.0, 50.0), 0.2);
        approx(break_even_point(1000.0, 15.0, 5.0), 100.0);
        approx(capital_asset_pricing_model(0.02, 1.5, 0.1), 0.14);
        approx(bond_price(1000.0, 0.0, 0.1, 1.0), 1000.0 / 1.1);
        approx(tax_equivalent_yield(0.03, 0.25), 0.04);
    }

    #[test]
    fn test_zero_divisor_is_not_finite() {
        assert!(!current_ratio(100.0, 0.0).is_finite());
        assert!(!perpetuity(0.0, 0.0).is_finite());
        assert!(!doubling_time_continuous_compounding(0.0).is_finite());
    }
}
