//! Common annotation sources for tests.

/// A small XML annotation file exercising references, the schema namespace,
/// nested records, text content and an empty collection.
pub const ORDERS_ANNOTATIONS: &str = r#"<edmx:Edmx Version="4.0">
  <edmx:Reference Uri="/sap/vocabularies/UI.xml">
    <edmx:Include Namespace="com.sap.vocabularies.UI.v1" Alias="UI"/>
  </edmx:Reference>
  <edmx:Reference Uri="/sap/opu/odata/sap/SVC/$metadata">
    <edmx:Include Namespace="SVC" Alias="S"/>
  </edmx:Reference>
  <edmx:DataServices>
    <Schema Namespace="local" Alias="L">
      <Annotations Target="S.Orders/to_Customer">
        <Annotation Term="UI.LineItem">
          <Collection>
            <Record Type="UI.DataField">
              <PropertyValue Property="Value" Path="to_Customer/@UI.Hidden"/>
              <PropertyValue Property="Label">
                <String>Order</String>
              </PropertyValue>
            </Record>
          </Collection>
        </Annotation>
        <Annotation Term="UI.Hidden"/>
        <Annotation Term="UI.Facets">
          <Collection></Collection>
        </Annotation>
      </Annotations>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

/// Pointer path of the `Path` attribute in [`ORDERS_ANNOTATIONS`].
pub const PATH_ATTRIBUTE: &str =
    "targets/0/terms/0/content/0/content/0/content/0/attributes/Path";

/// Pointer path of the `Order` text node in [`ORDERS_ANNOTATIONS`].
pub const ORDER_TEXT: &str =
    "targets/0/terms/0/content/0/content/0/content/1/content/0/content/0";
