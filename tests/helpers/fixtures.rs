//! A small mapper project: model classes, mapper interfaces and their XML.

use mapperlink::hir::TypeDecl;

pub const USER_MAPPER_PATH: &str = "src/main/resources/mapper/UserMapper.xml";
pub const CONFIG_PATH: &str = "src/main/resources/mybatis-config.xml";

pub const USER_MAPPER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">
<mapper namespace="com.app.dao.UserMapper">
    <resultMap id="userMap" type="User">
        <id property="id" column="id"/>
        <result property="name" column="name"/>
        <result property="address.city" column="city"/>
    </resultMap>
    <sql id="userColumns">id, name, city</sql>
    <select id="findById" resultMap="userMap" parameterType="long">
        select <include refid="userColumns"/> from users where id = #{id}
    </select>
    <select id="selectAll" resultType="User">
        select * from users
    </select>
    <insert id="insert" parameterType="com.app.model.User">
        insert into users (name) values (#{name})
    </insert>
</mapper>
"#;

/// Same namespace, with one unresolved reference of each kind.
pub const BROKEN_MAPPER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<mapper namespace="com.app.dao.UserMapper">
    <resultMap id="badMap" type="User">
        <result property="address.zip" column="zip"/>
    </resultMap>
    <select id="findByEmail" resultType="Usr">
        select * from users where email = #{email}
    </select>
</mapper>
"#;

pub const CONFIG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE configuration PUBLIC "-//mybatis.org//DTD Config 3.0//EN" "http://mybatis.org/dtd/mybatis-3-config.dtd">
<configuration>
    <typeAliases>
        <package name="com.app.model"/>
        <typeAlias alias="Member" type="com.app.model.User"/>
    </typeAliases>
    <mappers>
        <package name="com.app.dao"/>
    </mappers>
</configuration>
"#;

pub const BEANS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<beans>
    <bean id="sqlSessionFactory" class="org.mybatis.spring.SqlSessionFactoryBean">
        <property name="typeAliasesPackage" value="com.app.dto"/>
    </bean>
</beans>
"#;

/// Declarations of the project's classes, grouped by source file.
pub fn model_sources() -> Vec<(&'static str, Vec<TypeDecl>)> {
    vec![
        (
            "java/lang.java",
            vec![
                TypeDecl::class("java.lang.String"),
                TypeDecl::class("java.lang.Long"),
            ],
        ),
        ("java/util/List.java", vec![TypeDecl::interface("java.util.List")]),
        (
            "com/app/model/BaseEntity.java",
            vec![TypeDecl::class("com.app.model.BaseEntity").field("id", "java.lang.Long")],
        ),
        (
            "com/app/model/User.java",
            vec![
                TypeDecl::class("com.app.model.User")
                    .extends("com.app.model.BaseEntity")
                    .field("name", "java.lang.String")
                    .field("address", "com.app.model.Address")
                    .static_field("SERIAL", "long")
                    .setter("setoName", "java.lang.String"),
            ],
        ),
        (
            "com/app/model/Address.java",
            vec![
                TypeDecl::class("com.app.model.Address")
                    .field("city", "java.lang.String")
                    .field("street", "java.lang.String"),
            ],
        ),
        (
            "com/app/model/Order.java",
            vec![TypeDecl::class("com.app.model.Order").with_alias("purchase")],
        ),
        (
            "com/app/dto/UserDto.java",
            vec![TypeDecl::class("com.app.dto.UserDto")],
        ),
        (
            "com/app/dao/BaseMapper.java",
            vec![TypeDecl::interface("com.app.dao.BaseMapper").method(
                "selectAll",
                &[],
                Some("java.util.List"),
            )],
        ),
        (
            "com/app/dao/UserMapper.java",
            vec![
                TypeDecl::interface("com.app.dao.UserMapper")
                    .extends("com.app.dao.BaseMapper")
                    .method("findById", &["long"], Some("com.app.model.User"))
                    .method("insert", &["com.app.model.User"], Some("int")),
            ],
        ),
        (
            "com/app/dao/OrderMapper.java",
            vec![TypeDecl::interface("com.app.dao.OrderMapper").method(
                "selectAll",
                &[],
                Some("java.util.List"),
            )],
        ),
    ]
}
